use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use nuclearvet_core::auth::SessionStore;
use nuclearvet_core::models::{AuthenticatedUser, UserUpdate};
use nuclearvet_core::storage::{FileStorage, Storage, SESSION_SNAPSHOT_KEY, TOKEN_KEY, USER_KEY};

fn user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: 11,
        first_name: "Laura".to_string(),
        last_name: "Pardo".to_string(),
        email: "laura@nuclearvet.co".to_string(),
        role: "ADMIN".to_string(),
        token: "file-token".to_string(),
    }
}

fn open(dir: &TempDir) -> Arc<FileStorage> {
    Arc::new(FileStorage::open(dir.path().join("storage.json")))
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let session = SessionStore::restore(open(&dir));
        session.login(user()).unwrap();
    }

    let restored = SessionStore::restore(open(&dir));
    assert!(restored.is_authenticated());
    assert_eq!(restored.current_user(), Some(user()));
    assert_eq!(restored.persisted_token().as_deref(), Some("file-token"));
}

#[test]
fn test_logout_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let session = SessionStore::restore(open(&dir));
        session.login(user()).unwrap();
        session.logout();
    }

    let storage = open(&dir);
    assert_eq!(storage.get_item(TOKEN_KEY), None);
    assert_eq!(storage.get_item(USER_KEY), None);
    let restored = SessionStore::restore(storage);
    assert!(!restored.is_authenticated());
    assert_eq!(restored.current_user(), None);
}

#[test]
fn test_profile_update_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let session = SessionStore::restore(open(&dir));
        session.login(user()).unwrap();
        session.update_user(&UserUpdate {
            first_name: Some("Laura M.".to_string()),
            ..Default::default()
        });
    }

    let restored = SessionStore::restore(open(&dir));
    let current = restored.current_user().unwrap();
    assert_eq!(current.first_name, "Laura M.");
    assert_eq!(current.token, "file-token");
}

#[test]
fn test_cleared_token_invalidates_snapshot() {
    let dir = TempDir::new().unwrap();

    {
        let session = SessionStore::restore(open(&dir));
        session.login(user()).unwrap();
    }

    // Another writer removed the token but left the snapshot behind
    let storage = open(&dir);
    storage.remove_item(TOKEN_KEY).unwrap();
    assert!(storage.get_item(SESSION_SNAPSHOT_KEY).is_some());

    let restored = SessionStore::restore(storage);
    assert!(!restored.is_authenticated());
}

#[test]
fn test_file_layout_matches_console_keys() {
    let dir = TempDir::new().unwrap();
    let session = SessionStore::restore(open(&dir));
    session.login(user()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let file: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(file["token"], "file-token");
    let usuario: Value = serde_json::from_str(file["usuario"].as_str().unwrap()).unwrap();
    assert_eq!(usuario["nombre"], "Laura");
    assert_eq!(usuario["rol"], "ADMIN");

    let snapshot: Value =
        serde_json::from_str(file["autenticacion-storage"].as_str().unwrap()).unwrap();
    assert_eq!(snapshot["version"], 0);
    assert_eq!(snapshot["state"]["isAuthenticated"], true);
    assert_eq!(snapshot["state"]["user"]["token"], "file-token");
}
