//! Login, logout, and session persistence flows against the stub API.
//!
//! These tests use the real file-backed session store in a temp directory,
//! so they cover the restore-on-construction path end to end.
//!
//! Run with: cargo test -p chaikart-integration-tests

use std::path::Path;

use chaikart_integration_tests::{STUB_TOKEN, StubApi, VALID_PASSWORD, VALID_USERNAME};
use chaikart_storefront::api::StoreClient;
use chaikart_storefront::persist::{FileStore, KeyValueStore, PersistError, session_keys};
use chaikart_storefront::store::Store;

// ============================================================================
// Login Success
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_for_the_next_store() {
    let stub = StubApi::start().await;
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let session_file = temp.path().join("session.json");
    let config = stub.config(&session_file);

    let mut store = Store::from_config(&config);
    assert!(!store.auth().is_authenticated());

    assert!(store.login(VALID_USERNAME, VALID_PASSWORD).await);
    assert!(store.auth().is_authenticated());
    assert_eq!(store.auth().user(), Some(VALID_USERNAME));
    assert_eq!(store.auth().token(), Some(STUB_TOKEN));

    // Both keys are on disk
    let file = FileStore::new(&session_file);
    assert_eq!(
        file.get(session_keys::TOKEN)
            .expect("readable session file")
            .as_deref(),
        Some(STUB_TOKEN)
    );
    assert_eq!(
        file.get(session_keys::USERNAME)
            .expect("readable session file")
            .as_deref(),
        Some(VALID_USERNAME)
    );

    // A fresh store trusts the persisted session without a round-trip
    let restored = Store::from_config(&config);
    assert!(restored.auth().is_authenticated());
    assert_eq!(restored.auth().user(), Some(VALID_USERNAME));
    assert_eq!(restored.auth().token(), Some(STUB_TOKEN));
}

// ============================================================================
// Login Rejection
// ============================================================================

#[tokio::test]
async fn test_rejected_login_clears_state_and_disk() {
    let stub = StubApi::start().await;
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let session_file = temp.path().join("session.json");

    // Seed a previous session on disk
    let seed = FileStore::new(&session_file);
    seed.set(session_keys::TOKEN, "old-token")
        .expect("writable session file");
    seed.set(session_keys::USERNAME, "johnd")
        .expect("writable session file");

    let config = stub.config(&session_file);
    let mut store = Store::from_config(&config);
    assert!(store.auth().is_authenticated());

    let authenticated = store.login("johnd", "wrong-password").await;

    assert!(!authenticated);
    assert!(!store.auth().is_authenticated());
    assert_eq!(store.auth().user(), None);
    assert_eq!(store.auth().token(), None);
    assert_eq!(
        store.auth().error(),
        Some("Login failed: username or password is incorrect")
    );

    // The stale keys are gone from disk too
    let file = FileStore::new(&session_file);
    assert_eq!(
        file.get(session_keys::TOKEN).expect("readable session file"),
        None
    );
    assert_eq!(
        file.get(session_keys::USERNAME)
            .expect("readable session file"),
        None
    );
}

#[tokio::test]
async fn test_empty_token_login_fails_and_clears_session() {
    let stub = StubApi::start().await;
    stub.set_empty_token(true);
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let session_file = temp.path().join("session.json");

    // Seed a previous session on disk
    let seed = FileStore::new(&session_file);
    seed.set(session_keys::TOKEN, "old-token")
        .expect("writable session file");
    seed.set(session_keys::USERNAME, "johnd")
        .expect("writable session file");

    let config = stub.config(&session_file);
    let mut store = Store::from_config(&config);
    assert!(store.auth().is_authenticated());

    // Right credentials, but the server answers 200 with no usable token
    let authenticated = store.login(VALID_USERNAME, VALID_PASSWORD).await;

    assert!(!authenticated);
    assert!(!store.auth().is_authenticated());
    assert_eq!(store.auth().user(), None);
    assert_eq!(store.auth().token(), None);
    assert_eq!(
        store.auth().error(),
        Some("Login failed: No token received from server")
    );

    let file = FileStore::new(&session_file);
    assert_eq!(
        file.get(session_keys::TOKEN).expect("readable session file"),
        None
    );
    assert_eq!(
        file.get(session_keys::USERNAME)
            .expect("readable session file"),
        None
    );
}

#[tokio::test]
async fn test_clear_login_error_keeps_logged_out_state() {
    let stub = StubApi::start().await;
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let config = stub.config(&temp.path().join("session.json"));

    let mut store = Store::from_config(&config);
    store.login("johnd", "wrong-password").await;
    assert!(store.auth().error().is_some());

    store.clear_login_error();

    assert_eq!(store.auth().error(), None);
    assert!(!store.auth().is_authenticated());
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_round_trip() {
    let stub = StubApi::start().await;
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let session_file = temp.path().join("session.json");
    let config = stub.config(&session_file);

    let mut store = Store::from_config(&config);
    assert!(store.login(VALID_USERNAME, VALID_PASSWORD).await);

    store.logout();

    assert!(!store.auth().is_authenticated());
    assert_eq!(store.auth().user(), None);
    assert_eq!(store.auth().error(), None);

    let file = FileStore::new(&session_file);
    assert_eq!(
        file.get(session_keys::TOKEN).expect("readable session file"),
        None
    );

    // The next store starts logged out
    let next = Store::from_config(&config);
    assert!(!next.auth().is_authenticated());
}

// ============================================================================
// Persistence Failures
// ============================================================================

/// A port whose writes always fail, the way a full or read-only disk would.
struct BrokenPort;

impl KeyValueStore for BrokenPort {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Io(std::io::Error::other("disk full")))
    }

    fn remove(&self, _key: &str) -> Result<(), PersistError> {
        Err(PersistError::Io(std::io::Error::other("disk full")))
    }
}

#[tokio::test]
async fn test_auth_state_transitions_despite_port_write_failures() {
    let stub = StubApi::start().await;
    let client = StoreClient::new(&stub.config(Path::new("unused-session.json")));
    let mut store = Store::new(client, Box::new(BrokenPort));
    assert!(!store.auth().is_authenticated());

    // Login lands in memory even though both key writes fail
    assert!(store.login(VALID_USERNAME, VALID_PASSWORD).await);
    assert!(store.auth().is_authenticated());
    assert_eq!(store.auth().user(), Some(VALID_USERNAME));
    assert_eq!(store.auth().token(), Some(STUB_TOKEN));
    assert_eq!(store.auth().error(), None);

    // Logout clears memory even though both key removals fail
    store.logout();
    assert!(!store.auth().is_authenticated());
    assert_eq!(store.auth().user(), None);
    assert_eq!(store.auth().token(), None);
}
