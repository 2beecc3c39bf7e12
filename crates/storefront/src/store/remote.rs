//! Slice state for data fetched from the remote API.
//!
//! Each domain keeps its fetched data next to one [`RequestLifecycle`]. A
//! successful settlement replaces the relevant field wholesale with the
//! decoded payload; a failed one records the message and leaves the data
//! from the last good fetch in place.

use crate::api::types::Cart;
use crate::lifecycle::{RequestLifecycle, RequestToken};

// =============================================================================
// RemoteCollection
// =============================================================================

/// A fetched list plus an optionally selected element, sharing one
/// lifecycle. Covers the product and user domains.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    lifecycle: RequestLifecycle,
    list: Vec<T>,
    selected: Option<T>,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            lifecycle: RequestLifecycle::new(),
            list: Vec::new(),
            selected: None,
        }
    }
}

impl<T> RemoteCollection<T> {
    /// Create an empty, idle collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for this domain.
    pub fn begin(&mut self) -> RequestToken {
        self.lifecycle.begin()
    }

    /// Settle a successful list fetch, replacing the list wholesale.
    ///
    /// Returns `false` and drops the payload if the token is stale.
    pub fn complete_list(&mut self, token: RequestToken, list: Vec<T>) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.list = list;
        true
    }

    /// Settle a successful single-item fetch, replacing the selection.
    ///
    /// Returns `false` and drops the payload if the token is stale.
    pub fn complete_selected(&mut self, token: RequestToken, item: T) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.selected = Some(item);
        true
    }

    /// Settle a failed fetch. Existing data stays untouched.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        self.lifecycle.fail(token, message)
    }

    /// Drop the selection without touching the list.
    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    /// The last successfully fetched list.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.list
    }

    /// The selected item, if one was fetched.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Whether a fetch for this domain is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// The last fetch error for this domain, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }
}

// =============================================================================
// CategoriesState
// =============================================================================

/// Category names. List-only; there is no single-category fetch.
#[derive(Debug, Clone, Default)]
pub struct CategoriesState {
    lifecycle: RequestLifecycle,
    list: Vec<String>,
}

impl CategoriesState {
    /// Create an empty, idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a categories fetch.
    pub fn begin(&mut self) -> RequestToken {
        self.lifecycle.begin()
    }

    /// Settle a successful fetch, replacing the list wholesale.
    pub fn complete(&mut self, token: RequestToken, list: Vec<String>) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.list = list;
        true
    }

    /// Settle a failed fetch. Existing data stays untouched.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        self.lifecycle.fail(token, message)
    }

    /// The category names.
    #[must_use]
    pub fn list(&self) -> &[String] {
        &self.list
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// The last fetch error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }
}

// =============================================================================
// CartsState
// =============================================================================

/// Server-side cart records: the full list, a selected record, and the
/// carts of one user. One lifecycle covers all three fetches.
#[derive(Debug, Clone, Default)]
pub struct CartsState {
    lifecycle: RequestLifecycle,
    list: Vec<Cart>,
    selected: Option<Cart>,
    user_carts: Vec<Cart>,
}

impl CartsState {
    /// Create an empty, idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a carts fetch.
    pub fn begin(&mut self) -> RequestToken {
        self.lifecycle.begin()
    }

    /// Settle a successful all-carts fetch.
    pub fn complete_list(&mut self, token: RequestToken, list: Vec<Cart>) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.list = list;
        true
    }

    /// Settle a successful single-cart fetch.
    pub fn complete_selected(&mut self, token: RequestToken, cart: Cart) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.selected = Some(cart);
        true
    }

    /// Settle a successful per-user carts fetch.
    pub fn complete_user_carts(&mut self, token: RequestToken, carts: Vec<Cart>) -> bool {
        if !self.lifecycle.complete(token) {
            return false;
        }
        self.user_carts = carts;
        true
    }

    /// Settle a failed fetch. Existing data stays untouched.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        self.lifecycle.fail(token, message)
    }

    /// Drop the selected cart.
    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    /// All cart records from the last successful fetch.
    #[must_use]
    pub fn list(&self) -> &[Cart] {
        &self.list
    }

    /// The selected cart record, if one was fetched.
    #[must_use]
    pub fn selected(&self) -> Option<&Cart> {
        self.selected.as_ref()
    }

    /// The last fetched per-user cart records.
    #[must_use]
    pub fn user_carts(&self) -> &[Cart] {
        &self.user_carts
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// The last fetch error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }
}
