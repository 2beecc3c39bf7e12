//! Login session state.
//!
//! [`AuthState`] is pure state like the cart: the [`crate::store::Store`]
//! drives the API call and the storage writes around it. Authentication is
//! derived from token presence, never tracked as a separate flag that could
//! drift.

use crate::lifecycle::{RequestLifecycle, RequestToken};

/// The login session: who is logged in, their token, and the login
/// request lifecycle.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    user: Option<String>,
    token: Option<String>,
    lifecycle: RequestLifecycle,
}

impl AuthState {
    /// Create a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from persisted values.
    ///
    /// A persisted token is trusted until an API call rejects it; there is
    /// no validation round-trip at startup.
    #[must_use]
    pub fn restore(user: Option<String>, token: Option<String>) -> Self {
        Self {
            user,
            token,
            lifecycle: RequestLifecycle::new(),
        }
    }

    /// Start a login attempt.
    pub fn begin_login(&mut self) -> RequestToken {
        self.lifecycle.begin()
    }

    /// Settle a successful login, storing the username and bearer token.
    ///
    /// Returns `false` (and changes nothing) if a newer login attempt has
    /// superseded this one.
    pub fn complete_login(
        &mut self,
        token: RequestToken,
        username: &str,
        api_token: String,
    ) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.user = Some(username.to_string());
        self.token = Some(api_token);
        true
    }

    /// Settle a failed login.
    ///
    /// Clears any existing credentials: after a rejected login the session
    /// is logged out, even if it was logged in before the attempt. Returns
    /// `false` (and changes nothing) if a newer attempt superseded this one.
    pub fn fail_login(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.lifecycle.fail(token, message) {
            return false;
        }
        self.user = None;
        self.token = None;
        true
    }

    /// Log out, clearing credentials and any login error.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.lifecycle.clear_error();
    }

    /// Dismiss the login error.
    pub fn clear_error(&mut self) {
        self.lifecycle.clear_error();
    }

    /// Whether a session token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The logged-in username, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a login attempt is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// The last login error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_token_authenticates() {
        let auth = AuthState::restore(Some("mor_2314".to_string()), Some("jwt".to_string()));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user(), Some("mor_2314"));
        assert_eq!(auth.token(), Some("jwt"));
    }

    #[test]
    fn test_restored_username_without_token_is_not_authenticated() {
        let auth = AuthState::restore(Some("mor_2314".to_string()), None);
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), Some("mor_2314"));
    }

    #[test]
    fn test_login_success() {
        let mut auth = AuthState::new();
        let token = auth.begin_login();
        assert!(auth.is_loading());

        assert!(auth.complete_login(token, "mor_2314", "jwt".to_string()));
        assert!(!auth.is_loading());
        assert!(auth.is_authenticated());
        assert_eq!(auth.user(), Some("mor_2314"));
        assert_eq!(auth.error(), None);
    }

    #[test]
    fn test_failed_login_clears_existing_credentials() {
        let mut auth = AuthState::restore(Some("johnd".to_string()), Some("old-jwt".to_string()));

        let token = auth.begin_login();
        assert!(auth.fail_login(token, "username or password is incorrect"));

        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), None);
        assert_eq!(auth.token(), None);
        assert_eq!(auth.error(), Some("username or password is incorrect"));
    }

    #[test]
    fn test_superseded_login_is_discarded() {
        let mut auth = AuthState::new();
        let first = auth.begin_login();
        let second = auth.begin_login();

        // The first attempt resolves late; its result must not apply.
        assert!(!auth.complete_login(first, "johnd", "stale-jwt".to_string()));
        assert!(!auth.is_authenticated());
        assert!(auth.is_loading());

        assert!(auth.complete_login(second, "mor_2314", "fresh-jwt".to_string()));
        assert_eq!(auth.user(), Some("mor_2314"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut auth = AuthState::new();
        let token = auth.begin_login();
        auth.complete_login(token, "mor_2314", "jwt".to_string());

        let token = auth.begin_login();
        auth.fail_login(token, "boom");

        auth.logout();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), None);
        assert_eq!(auth.error(), None);
    }

    #[test]
    fn test_clear_error_keeps_credentials() {
        let mut auth = AuthState::restore(None, None);
        let token = auth.begin_login();
        auth.fail_login(token, "boom");

        auth.clear_error();
        assert_eq!(auth.error(), None);
        assert!(!auth.is_authenticated());
    }
}
