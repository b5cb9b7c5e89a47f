//! API client for communicating with the NuclearVet REST backend.
//!
//! Every feature service goes through `ApiClient`. It attaches the persisted
//! session token to outgoing requests and tears the session down when the
//! backend answers 401.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::config::Config;

use super::{ApiError, RequestOptions};

// ============================================================================
// Constants
// ============================================================================

/// Entry point the console returns to when the session is invalidated.
pub const LOGIN_PATH: &str = "/login";

/// HTTP request timeout in seconds, unless a call overrides it.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Body placeholder for `post`/`put`/`patch` calls that send nothing.
pub const NO_BODY: Option<&()> = None;

/// Reaction to a session the backend has rejected.
///
/// The client has already cleared the session when this runs; implementors
/// decide how to send the user back to `login_path`.
pub trait SessionInvalidated: Send + Sync {
    fn on_session_invalidated(&self, login_path: &str);
}

impl<F> SessionInvalidated for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_session_invalidated(&self, login_path: &str) {
        self(login_path)
    }
}

/// Default hook: records the invalidation and does nothing else.
struct LogInvalidation;

impl SessionInvalidated for LogInvalidation {
    fn on_session_invalidated(&self, login_path: &str) {
        warn!(login_path = login_path, "Session invalidated, login required");
    }
}

/// API client for the NuclearVet backend.
/// Clone is cheap - the connection pool, session and hook are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
    session: Arc<SessionStore>,
    on_invalidated: Arc<dyn SessionInvalidated>,
}

impl ApiClient {
    /// Create a client for `base_url` reading its token from `session`
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(default_headers)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
            on_invalidated: Arc::new(LogInvalidation),
        })
    }

    /// Create a client for the configured backend
    pub fn from_config(config: &Config, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        Self::new(config.resolved_base_url(), session)
    }

    /// Install the hook run after a 401 has cleared the session
    pub fn with_session_invalidated(mut self, hook: Arc<dyn SessionInvalidated>) -> Self {
        self.on_invalidated = hook;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Join `path` onto the base URL with exactly one slash between them
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.persisted_token() {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidHeader("session token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Build a request with the session token and per-call options applied.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<RequestBuilder, ApiError> {
        let mut request = self
            .client
            .request(method, self.url(path))
            .headers(self.auth_headers()?);

        if let Some(options) = options {
            if !options.query.is_empty() {
                request = request.query(&options.query);
            }
            if !options.headers.is_empty() {
                request = request.headers(options.headers);
            }
            if let Some(timeout) = options.timeout {
                request = request.timeout(timeout);
            }
        }

        Ok(request)
    }

    /// Pass successful responses through; turn failures into `ApiError`.
    /// A 401 additionally ends the session before the error is returned.
    async fn check_response(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        } else {
            debug!(status = status.as_u16(), "Request failed");
        }
        Err(ApiError::from_status(status, &body))
    }

    fn handle_unauthorized(&self) {
        warn!("Backend rejected the session token, logging out");
        self.session.logout();
        self.on_invalidated.on_session_invalidated(LOGIN_PATH);
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        // Bodyless responses (204, empty 200) decode as `null`
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(method = %method, path = path, "Sending request");

        let mut request = self.build_request(method, path, options)?;
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        Self::decode(path, response).await
    }

    // ===== Verbs =====

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, NO_BODY, options).await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, body, options).await
    }

    pub async fn put<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, body, options).await
    }

    pub async fn patch<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, body, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, NO_BODY, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthenticatedUser;
    use crate::storage::{MemoryStorage, Storage, TOKEN_KEY};

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let session = Arc::new(SessionStore::restore(Arc::new(MemoryStorage::new())));
        if let Some(token) = token {
            session
                .login(AuthenticatedUser {
                    id: 1,
                    first_name: "Ana".to_string(),
                    last_name: "Gomez".to_string(),
                    email: "ana@nuclearvet.co".to_string(),
                    role: "ADMIN".to_string(),
                    token: token.to_string(),
                })
                .unwrap();
        }
        ApiClient::new("http://localhost:8080/api/", session).unwrap()
    }

    #[test]
    fn test_url_join() {
        let client = client_with_token(None);
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/pacientes"), "http://localhost:8080/api/pacientes");
        assert_eq!(client.url("pacientes/3"), "http://localhost:8080/api/pacientes/3");
        assert_eq!(client.url(""), "http://localhost:8080/api");
    }

    #[test]
    fn test_bearer_header_attached_with_session() {
        let client = client_with_token(Some("abc123"));
        let request = client
            .build_request(Method::GET, "/citas", None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_no_auth_header_without_session() {
        let client = client_with_token(None);
        let request = client
            .build_request(Method::GET, "/citas", None)
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_read_from_storage_not_memory() {
        let client = client_with_token(Some("abc123"));
        // Another writer replaces the persisted token behind the store's back
        client
            .session()
            .storage()
            .set_item(TOKEN_KEY, "rotated")
            .unwrap();
        let request = client
            .build_request(Method::GET, "/citas", None)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer rotated"
        );
    }

    #[test]
    fn test_options_apply_query_and_override_headers() {
        let client = client_with_token(Some("abc123"));
        let options = RequestOptions::new()
            .query("fecha", "2024-05-02")
            .header(header::AUTHORIZATION, header::HeaderValue::from_static("Bearer other"));
        let request = client
            .build_request(Method::GET, "/citas", Some(options))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("fecha=2024-05-02"));
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer other"
        );
    }

    #[test]
    fn test_closure_hook() {
        let seen = std::sync::Mutex::new(Vec::new());
        let hook = |path: &str| seen.lock().unwrap().push(path.to_string());
        hook.on_session_invalidated(LOGIN_PATH);
        assert_eq!(*seen.lock().unwrap(), vec!["/login".to_string()]);
    }
}
