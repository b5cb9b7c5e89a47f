use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, AuthenticatedUser, LoginRequest, Payload, User, UserUpdate};

/// Login, password recovery and the current user's profile.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Authenticate and start a session with the returned identity
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: Payload<AuthResponse> =
            self.api.post("/auth/login", Some(&request), None).await?;

        let user = response.into_inner().into_authenticated_user();
        self.api
            .session()
            .login(user.clone())
            .map_err(|e| ApiError::InvalidResponse(format!("Login response rejected: {}", e)))?;

        info!(user_id = user.id, role = %user.role, "Logged in");
        Ok(user)
    }

    /// End the local session. The backend keeps no session state to revoke.
    pub fn logout(&self) {
        self.api.session().logout();
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email });
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .post("/auth/recuperar-contrasena", Some(&body), None)
            .await?;
        Ok(())
    }

    /// Set a new password using the token from the recovery email
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "token": token,
            "nuevaContrasena": new_password,
        });
        let _: Payload<Option<serde_json::Value>> = self
            .api
            .post("/auth/cambiar-contrasena", Some(&body), None)
            .await?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        let profile: Payload<User> = self.api.get("/usuarios/me", None).await?;
        Ok(profile.into_inner())
    }

    /// Save profile changes and merge them into the live session
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let saved: Payload<User> = self.api.put("/usuarios/me", Some(update), None).await?;
        self.api.session().update_user(update);
        Ok(saved.into_inner())
    }
}
