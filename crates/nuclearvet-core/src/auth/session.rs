use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{AuthenticatedUser, UserUpdate};
use crate::storage::{Storage, StorageError, SESSION_SNAPSHOT_KEY, TOKEN_KEY, USER_KEY};

/// Version tag written alongside the persisted snapshot.
const SNAPSHOT_VERSION: u32 = 0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot log in without a token")]
    EmptyToken,
}

/// Who is logged in.
///
/// `is_authenticated` is derived from `user` by every constructor, including
/// deserialization, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionStateRepr")]
pub struct SessionState {
    user: Option<AuthenticatedUser>,
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
}

#[derive(Deserialize)]
struct SessionStateRepr {
    #[serde(default)]
    user: Option<AuthenticatedUser>,
    // Read and discarded; the flag is recomputed from `user`
    #[serde(rename = "isAuthenticated", default)]
    #[allow(dead_code)]
    is_authenticated: bool,
}

impl From<SessionStateRepr> for SessionState {
    fn from(repr: SessionStateRepr) -> Self {
        SessionState::new(repr.user)
    }
}

impl SessionState {
    pub fn new(user: Option<AuthenticatedUser>) -> Self {
        let is_authenticated = user.is_some();
        Self {
            user,
            is_authenticated,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}

/// On-disk shape of the session snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSnapshot {
    state: SessionState,
    #[serde(default)]
    version: u32,
}

/// The single source of truth for the logged-in identity.
///
/// State lives in memory for fast reads and is mirrored into durable storage
/// on every change. The bearer token itself is always read back from storage,
/// see [`SessionStore::persisted_token`].
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build a store, rehydrating the last persisted snapshot if one exists.
    pub fn restore(storage: Arc<dyn Storage>) -> Self {
        let state = Self::load_snapshot(storage.as_ref());
        debug!(is_authenticated = state.is_authenticated(), "Session restored");
        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    fn load_snapshot(storage: &dyn Storage) -> SessionState {
        let Some(raw) = storage.get_item(SESSION_SNAPSHOT_KEY) else {
            debug!("No persisted session snapshot");
            return SessionState::anonymous();
        };

        let snapshot: PersistedSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Failed to parse session snapshot, starting logged out");
                return SessionState::anonymous();
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(version = snapshot.version, "Unsupported session snapshot version, starting logged out");
            return SessionState::anonymous();
        }

        let Some(user) = snapshot.state.user else {
            return SessionState::anonymous();
        };

        // A snapshot whose token no longer matches storage was invalidated
        // (e.g. by a 401) after it was written.
        match storage.get_item(TOKEN_KEY) {
            Some(token) if !token.is_empty() && token == user.token => {
                SessionState::new(Some(user))
            }
            _ => {
                warn!("Persisted session token is missing or stale, starting logged out");
                SessionState::anonymous()
            }
        }
    }

    /// Record a successful login.
    pub fn login(&self, user: AuthenticatedUser) -> Result<(), SessionError> {
        if user.token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let mut guard = self.write_state();
        Self::log_write(self.storage.set_item(TOKEN_KEY, &user.token), TOKEN_KEY);
        self.persist_user(&user);

        let state = SessionState::new(Some(user));
        self.persist_snapshot(&state);
        *guard = state;
        drop(guard);

        info!("Session started");
        Ok(())
    }

    /// Forget the current identity. Safe to call when already logged out.
    pub fn logout(&self) {
        let was_authenticated = {
            let mut guard = self.write_state();
            Self::log_write(self.storage.remove_item(TOKEN_KEY), TOKEN_KEY);
            Self::log_write(self.storage.remove_item(USER_KEY), USER_KEY);

            let state = SessionState::anonymous();
            self.persist_snapshot(&state);
            let was = guard.is_authenticated();
            *guard = state;
            was
        };
        if was_authenticated {
            info!("Session ended");
        }
    }

    /// Merge `update` into the current user. No-op when logged out.
    ///
    /// Storage is written under the state lock, so a concurrent `logout`
    /// either sees the merged user or leaves nothing for this call to write.
    pub fn update_user(&self, update: &UserUpdate) {
        let mut guard = self.write_state();
        let Some(user) = guard.user.as_mut() else {
            debug!("Ignoring user update without an active session");
            return;
        };
        update.apply_to(user);

        if let Some(user) = guard.user() {
            self.persist_user(user);
        }
        self.persist_snapshot(&guard);
    }

    pub fn state(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.read_state().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    /// The bearer token as currently persisted.
    ///
    /// Reads storage on every call instead of the in-memory user so that a
    /// token written or cleared by another store instance is honoured.
    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn persist_user(&self, user: &AuthenticatedUser) {
        match serde_json::to_string(user) {
            Ok(json) => Self::log_write(self.storage.set_item(USER_KEY, &json), USER_KEY),
            Err(e) => warn!(error = %e, "Failed to serialize user snapshot"),
        }
    }

    fn persist_snapshot(&self, state: &SessionState) {
        let snapshot = PersistedSnapshot {
            state: state.clone(),
            version: SNAPSHOT_VERSION,
        };
        match serde_json::to_string(&snapshot) {
            Ok(json) => Self::log_write(
                self.storage.set_item(SESSION_SNAPSHOT_KEY, &json),
                SESSION_SNAPSHOT_KEY,
            ),
            Err(e) => warn!(error = %e, "Failed to serialize session snapshot"),
        }
    }

    fn log_write(result: Result<(), StorageError>, key: &str) {
        if let Err(e) = result {
            warn!(key = key, error = %e, "Failed to write session storage");
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user(token: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            email: "ana@nuclearvet.co".to_string(),
            role: "ADMIN".to_string(),
            token: token.to_string(),
        }
    }

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::restore(storage.clone());
        (storage, store)
    }

    fn assert_consistent(state: &SessionState) {
        assert_eq!(state.is_authenticated(), state.user().is_some());
    }

    #[test]
    fn test_starts_empty_without_snapshot() {
        let (_, store) = store();
        let state = store.state();
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_login_persists_token_and_user() {
        let (storage, store) = store();
        store.login(user("abc123")).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("abc123"));
        assert!(storage.get_item(USER_KEY).is_some());
        assert!(storage.get_item(SESSION_SNAPSHOT_KEY).is_some());
        assert_eq!(store.persisted_token().as_deref(), Some("abc123"));
        assert_consistent(&store.state());
    }

    #[test]
    fn test_login_rejects_empty_token() {
        let (storage, store) = store();
        assert_eq!(store.login(user("")), Err(SessionError::EmptyToken));
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_logout_clears_everything() {
        let (storage, store) = store();
        store.login(user("abc123")).unwrap();
        store.logout();

        assert_eq!(store.state(), SessionState::anonymous());
        assert_eq!(storage.get_item(TOKEN_KEY), None);
        assert_eq!(storage.get_item(USER_KEY), None);
        assert_eq!(store.persisted_token(), None);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (storage, store) = store();
        store.login(user("abc123")).unwrap();

        store.logout();
        let once = (store.state(), storage.get_item(SESSION_SNAPSHOT_KEY));
        store.logout();
        let twice = (store.state(), storage.get_item(SESSION_SNAPSHOT_KEY));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_user_merges_and_keeps_token() {
        let (storage, store) = store();
        store.login(user("abc123")).unwrap();

        store.update_user(&UserUpdate {
            email: Some("x".to_string()),
            ..Default::default()
        });

        let current = store.current_user().unwrap();
        assert_eq!(
            current,
            AuthenticatedUser {
                email: "x".to_string(),
                ..user("abc123")
            }
        );
        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("abc123"));
        let snapshot: AuthenticatedUser =
            serde_json::from_str(&storage.get_item(USER_KEY).unwrap()).unwrap();
        assert_eq!(snapshot.email, "x");
    }

    #[test]
    fn test_update_user_without_session_is_noop() {
        let (storage, store) = store();
        store.update_user(&UserUpdate {
            email: Some("x".to_string()),
            ..Default::default()
        });
        assert!(store.current_user().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_update_racing_logout_leaves_no_user_behind() {
        for _ in 0..200 {
            let (storage, store) = store();
            store.login(user("abc123")).unwrap();

            std::thread::scope(|scope| {
                scope.spawn(|| {
                    store.update_user(&UserUpdate {
                        first_name: Some("Ana María".to_string()),
                        ..Default::default()
                    })
                });
                scope.spawn(|| store.logout());
            });

            assert!(!store.is_authenticated());
            assert_eq!(storage.get_item(USER_KEY), None);
            assert_eq!(storage.get_item(TOKEN_KEY), None);
            let restored = SessionStore::restore(storage.clone());
            assert!(!restored.is_authenticated());
        }
    }

    #[test]
    fn test_restore_round_trip() {
        let storage = Arc::new(MemoryStorage::new());
        let first = SessionStore::restore(storage.clone());
        first.login(user("abc123")).unwrap();
        let before = first.state();

        let second = SessionStore::restore(storage);
        assert_eq!(second.state(), before);
        assert_consistent(&second.state());
    }

    #[test]
    fn test_restore_discards_snapshot_with_stale_token() {
        let storage = Arc::new(MemoryStorage::new());
        let first = SessionStore::restore(storage.clone());
        first.login(user("abc123")).unwrap();

        // What an invalidation leaves behind if only the token was cleared
        storage.remove_item(TOKEN_KEY).unwrap();

        let second = SessionStore::restore(storage);
        assert!(!second.is_authenticated());
    }

    #[test]
    fn test_restore_ignores_corrupt_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(SESSION_SNAPSHOT_KEY, "{oops").unwrap();
        let store = SessionStore::restore(storage);
        assert_eq!(store.state(), SessionState::anonymous());
    }

    #[test]
    fn test_deserialize_normalizes_flag() {
        let json = r#"{"user": null, "isAuthenticated": true}"#;
        let state: SessionState = serde_json::from_str(json).unwrap();
        assert!(!state.is_authenticated());
        assert_consistent(&state);
    }

    #[test]
    fn test_snapshot_layout() {
        let (storage, store) = store();
        store.login(user("abc123")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get_item(SESSION_SNAPSHOT_KEY).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["isAuthenticated"], true);
        assert_eq!(raw["state"]["user"]["token"], "abc123");
    }
}
