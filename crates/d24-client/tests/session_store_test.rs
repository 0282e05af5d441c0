//! File-backed session persistence.

use d24_client::session::SessionError;
use d24_client::{FileSessionStore, MemorySessionStore, Session, SessionStore};
use d24_core::{Role, User};

fn driver() -> User {
    serde_json::from_value(serde_json::json!({
        "id": "usr_9", "email": "ravi@example.com", "role": "DRIVER", "city": "Mumbai"
    }))
    .unwrap()
}

#[test]
fn missing_file_loads_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
    let session = store.load().unwrap();
    assert!(!session.is_signed_in());
    assert!(session.pending_driver_email().is_none());
}

#[test]
fn save_then_load_restores_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

    let mut session = Session::new();
    session.sign_in("jwt-abc", driver());
    session.set_pending_driver_email("ravi@example.com");
    store.save(&session).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.bearer().unwrap(), "jwt-abc");
    assert_eq!(loaded.display_role(), Some(Role::Driver));
    assert_eq!(loaded.pending_driver_email(), Some("ravi@example.com"));
}

#[test]
fn file_uses_fixed_storage_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileSessionStore::new(&path);

    let mut session = Session::new();
    session.sign_in("jwt-abc", driver());
    session.set_pending_driver_email("ravi@example.com");
    store.save(&session).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["jwt_token"], "jwt-abc");
    assert_eq!(raw["user_data"]["role"], "DRIVER");
    assert_eq!(raw["pendingDriverEmail"], "ravi@example.com");
}

#[cfg(unix)]
#[test]
fn file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileSessionStore::new(&path);
    store.save(&Session::new()).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn clear_keeps_pending_registration() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));

    let mut session = Session::new();
    session.sign_in("jwt-abc", driver());
    session.set_pending_driver_email("ravi@example.com");
    store.save(&session).unwrap();
    store.clear().unwrap();

    let loaded = store.load().unwrap();
    assert!(!loaded.is_signed_in());
    assert!(loaded.user().is_none());
    assert_eq!(loaded.pending_driver_email(), Some("ravi@example.com"));
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = FileSessionStore::new(&path).load().unwrap_err();
    assert!(matches!(err, SessionError::Corrupt { .. }));
}

#[test]
fn last_write_wins() {
    let store = MemorySessionStore::new();
    let mut first = Session::new();
    first.sign_in("one", driver());
    store.save(&first).unwrap();

    let mut second = Session::new();
    second.set_pending_driver_email("later@example.com");
    store.save(&second).unwrap();

    let loaded = store.load().unwrap();
    assert!(!loaded.is_signed_in());
    assert_eq!(loaded.pending_driver_email(), Some("later@example.com"));
}
