//! Request lifecycle tracking for async fetches.
//!
//! Each domain slice owns one [`RequestLifecycle`]: a loading flag and the
//! last error message. Starting a fetch issues a [`RequestToken`]; settling
//! requires presenting it back. Because [`RequestLifecycle::begin`]
//! invalidates every earlier token, a slow response from a superseded fetch
//! lands as a no-op instead of overwriting newer state (newest request wins).

/// Identifies one issued request.
///
/// Obtained from [`RequestLifecycle::begin`] and consumed by
/// [`RequestLifecycle::complete`] or [`RequestLifecycle::fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Loading flag and last error for one domain slice.
///
/// One fetch at a time is current: beginning a new fetch supersedes any
/// in-flight one, whose settlement will then be discarded.
#[derive(Debug, Clone, Default)]
pub struct RequestLifecycle {
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl RequestLifecycle {
    /// Create an idle lifecycle with no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch: sets loading, clears the previous error, and returns
    /// the token the settlement must present.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        RequestToken(self.issued)
    }

    /// Settle a successful fetch.
    ///
    /// Returns `false` (and changes nothing) if the token is stale or the
    /// fetch already settled; the caller must then discard its payload.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if !self.loading || token.0 != self.issued {
            return false;
        }
        self.loading = false;
        true
    }

    /// Settle a failed fetch, recording the error message.
    ///
    /// Returns `false` (and changes nothing) if the token is stale or the
    /// fetch already settled.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.loading || token.0 != self.issued {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last fetch error, until the next [`begin`](Self::begin) clears it.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismiss the error without starting a new fetch.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_loading_and_clears_error() {
        let mut lifecycle = RequestLifecycle::new();
        let token = lifecycle.begin();
        assert!(lifecycle.fail(token, "boom"));
        assert_eq!(lifecycle.error(), Some("boom"));

        lifecycle.begin();
        assert!(lifecycle.is_loading());
        assert_eq!(lifecycle.error(), None);
    }

    #[test]
    fn test_complete_settles_fetch() {
        let mut lifecycle = RequestLifecycle::new();
        let token = lifecycle.begin();

        assert!(lifecycle.complete(token));
        assert!(!lifecycle.is_loading());
        assert_eq!(lifecycle.error(), None);
    }

    #[test]
    fn test_fail_records_message() {
        let mut lifecycle = RequestLifecycle::new();
        let token = lifecycle.begin();

        assert!(lifecycle.fail(token, "Failed to fetch products: HTTP 500"));
        assert!(!lifecycle.is_loading());
        assert_eq!(
            lifecycle.error(),
            Some("Failed to fetch products: HTTP 500")
        );
    }

    #[test]
    fn test_superseded_fetch_settles_as_noop() {
        let mut lifecycle = RequestLifecycle::new();
        let first = lifecycle.begin();
        let second = lifecycle.begin();

        // The superseded fetch comes back late; nothing changes.
        assert!(!lifecycle.complete(first));
        assert!(lifecycle.is_loading());
        assert!(!lifecycle.fail(first, "late failure"));
        assert_eq!(lifecycle.error(), None);

        assert!(lifecycle.complete(second));
        assert!(!lifecycle.is_loading());
    }

    #[test]
    fn test_double_settle_is_noop() {
        let mut lifecycle = RequestLifecycle::new();
        let token = lifecycle.begin();

        assert!(lifecycle.complete(token));
        assert!(!lifecycle.fail(token, "too late"));
        assert_eq!(lifecycle.error(), None);
    }

    #[test]
    fn test_clear_error() {
        let mut lifecycle = RequestLifecycle::new();
        let token = lifecycle.begin();
        lifecycle.fail(token, "boom");

        lifecycle.clear_error();
        assert_eq!(lifecycle.error(), None);
        assert!(!lifecycle.is_loading());
    }
}
