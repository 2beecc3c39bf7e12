//! The application state store.
//!
//! # Architecture
//!
//! One [`Store`] owns the API client, the session persistence port, and
//! every domain slice: products, categories, users, server-side cart
//! records, the live shopping cart, and the login session. Load operations
//! all follow the same shape - begin the slice's lifecycle, await the
//! client call, settle with either the payload or a domain-prefixed
//! message. Failures never propagate out of a load; callers read them from
//! the slice.
//!
//! # Example
//!
//! ```rust,ignore
//! use chaikart_storefront::config::StoreConfig;
//! use chaikart_storefront::store::Store;
//!
//! let mut store = Store::from_config(&StoreConfig::from_env()?);
//!
//! store.load_products().await;
//! for product in store.products().list() {
//!     println!("{}: {}", product.title, product.price);
//! }
//!
//! if store.login("mor_2314", "83r5^_").await {
//!     println!("logged in as {}", store.auth().user().unwrap_or("?"));
//! }
//! ```

pub mod remote;

pub use remote::{CartsState, CategoriesState, RemoteCollection};

use tracing::instrument;

use chaikart_core::{CartId, ProductId, UserId};

use crate::api::types::{Product, User};
use crate::api::{ApiError, StoreClient};
use crate::cart::ShoppingCart;
use crate::config::StoreConfig;
use crate::persist::{FileStore, KeyValueStore, session_keys};
use crate::session::AuthState;

/// The application state store.
///
/// Mutation is single-threaded by construction: every operation takes
/// `&mut self`, and the network awaits inside load operations are the only
/// suspension points.
pub struct Store {
    client: StoreClient,
    session: Box<dyn KeyValueStore>,
    products: RemoteCollection<Product>,
    categories: CategoriesState,
    users: RemoteCollection<User>,
    carts: CartsState,
    cart: ShoppingCart,
    auth: AuthState,
}

impl Store {
    /// Create a store over an API client and a session persistence port.
    ///
    /// The login session is restored from the port: a persisted token
    /// yields an authenticated session with no validation round-trip. Port
    /// read failures are logged and treated as a logged-out session.
    #[must_use]
    pub fn new(client: StoreClient, session: Box<dyn KeyValueStore>) -> Self {
        let token = read_session_key(session.as_ref(), session_keys::TOKEN);
        let user = read_session_key(session.as_ref(), session_keys::USERNAME);

        Self {
            client,
            session,
            products: RemoteCollection::new(),
            categories: CategoriesState::new(),
            users: RemoteCollection::new(),
            carts: CartsState::new(),
            cart: ShoppingCart::new(),
            auth: AuthState::restore(user, token),
        }
    }

    /// Create a store from configuration: a client against the configured
    /// API and a file-backed session at the configured path.
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        let client = StoreClient::new(config);
        let session = Box::new(FileStore::new(config.session_file.clone()));
        Self::new(client, session)
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Fetch the product catalog into the products slice.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) {
        let token = self.products.begin();
        match self.client.products().await {
            Ok(items) => {
                self.products.complete_list(token, items);
            }
            Err(e) => {
                self.products
                    .fail(token, format!("Failed to fetch products: {e}"));
            }
        }
    }

    /// Fetch one product into the products slice's selection.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn load_product(&mut self, id: ProductId) {
        let token = self.products.begin();
        match self.client.product(id).await {
            Ok(product) => {
                self.products.complete_selected(token, product);
            }
            Err(e) => {
                self.products
                    .fail(token, format!("Failed to fetch product: {e}"));
            }
        }
    }

    /// Fetch one category's products, replacing the product list.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn load_products_in_category(&mut self, category: &str) {
        let token = self.products.begin();
        match self.client.products_in_category(category).await {
            Ok(items) => {
                self.products.complete_list(token, items);
            }
            Err(e) => {
                self.products
                    .fail(token, format!("Failed to fetch products: {e}"));
            }
        }
    }

    /// Drop the selected product.
    pub fn clear_selected_product(&mut self) {
        self.products.clear_selected();
    }

    // =========================================================================
    // Category Operations
    // =========================================================================

    /// Fetch the category names into the categories slice.
    #[instrument(skip(self))]
    pub async fn load_categories(&mut self) {
        let token = self.categories.begin();
        match self.client.categories().await {
            Ok(list) => {
                self.categories.complete(token, list);
            }
            Err(e) => {
                self.categories
                    .fail(token, format!("Failed to fetch categories: {e}"));
            }
        }
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Fetch all users into the users slice.
    #[instrument(skip(self))]
    pub async fn load_users(&mut self) {
        let token = self.users.begin();
        match self.client.users().await {
            Ok(list) => {
                self.users.complete_list(token, list);
            }
            Err(e) => {
                self.users.fail(token, format!("Failed to fetch users: {e}"));
            }
        }
    }

    /// Fetch one user into the users slice's selection.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn load_user(&mut self, id: UserId) {
        let token = self.users.begin();
        match self.client.user(id).await {
            Ok(user) => {
                self.users.complete_selected(token, user);
            }
            Err(e) => {
                self.users.fail(token, format!("Failed to fetch user: {e}"));
            }
        }
    }

    /// Drop the selected user.
    pub fn clear_selected_user(&mut self) {
        self.users.clear_selected();
    }

    // =========================================================================
    // Cart Record Operations
    // =========================================================================

    /// Fetch all server-side cart records.
    #[instrument(skip(self))]
    pub async fn load_carts(&mut self) {
        let token = self.carts.begin();
        match self.client.carts().await {
            Ok(list) => {
                self.carts.complete_list(token, list);
            }
            Err(e) => {
                self.carts.fail(token, format!("Failed to fetch carts: {e}"));
            }
        }
    }

    /// Fetch one cart record into the carts slice's selection.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn load_cart(&mut self, id: CartId) {
        let token = self.carts.begin();
        match self.client.cart(id).await {
            Ok(cart) => {
                self.carts.complete_selected(token, cart);
            }
            Err(e) => {
                self.carts.fail(token, format!("Failed to fetch cart: {e}"));
            }
        }
    }

    /// Fetch the cart records of one user.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn load_user_carts(&mut self, user_id: UserId) {
        let token = self.carts.begin();
        match self.client.user_carts(user_id).await {
            Ok(carts) => {
                self.carts.complete_user_carts(token, carts);
            }
            Err(e) => {
                self.carts
                    .fail(token, format!("Failed to fetch user carts: {e}"));
            }
        }
    }

    /// Drop the selected cart record.
    pub fn clear_selected_cart(&mut self) {
        self.carts.clear_selected();
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Log in against the API.
    ///
    /// On success the session (token and username) is persisted through the
    /// port; persistence failures are logged and do not fail the login. On
    /// rejection the session state and the persisted keys are both cleared.
    /// A login superseded by a newer attempt touches neither.
    ///
    /// Returns whether the store is authenticated afterwards; the session
    /// state is authoritative either way.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let token = self.auth.begin_login();
        match self.client.login(username, password).await {
            Ok(api_token) => {
                if self.auth.complete_login(token, username, api_token.clone()) {
                    self.persist_session(username, &api_token);
                }
            }
            Err(e) => {
                if self.auth.fail_login(token, login_error_message(&e)) {
                    self.clear_persisted_session();
                }
            }
        }
        self.auth.is_authenticated()
    }

    /// Log out: clear the session state and the persisted keys.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.auth.logout();
        self.clear_persisted_session();
    }

    /// Dismiss the login error without touching credentials.
    pub fn clear_login_error(&mut self) {
        self.auth.clear_error();
    }

    fn persist_session(&self, username: &str, token: &str) {
        if let Err(e) = self.session.set(session_keys::TOKEN, token) {
            tracing::warn!(error = %e, "Failed to persist session token");
        }
        if let Err(e) = self.session.set(session_keys::USERNAME, username) {
            tracing::warn!(error = %e, "Failed to persist session username");
        }
    }

    fn clear_persisted_session(&self) {
        if let Err(e) = self.session.remove(session_keys::TOKEN) {
            tracing::warn!(error = %e, "Failed to remove persisted session token");
        }
        if let Err(e) = self.session.remove(session_keys::USERNAME) {
            tracing::warn!(error = %e, "Failed to remove persisted session username");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The products slice.
    #[must_use]
    pub const fn products(&self) -> &RemoteCollection<Product> {
        &self.products
    }

    /// The categories slice.
    #[must_use]
    pub const fn categories(&self) -> &CategoriesState {
        &self.categories
    }

    /// The users slice.
    #[must_use]
    pub const fn users(&self) -> &RemoteCollection<User> {
        &self.users
    }

    /// The server-side cart records slice.
    #[must_use]
    pub const fn carts(&self) -> &CartsState {
        &self.carts
    }

    /// The live shopping cart.
    #[must_use]
    pub const fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    /// Mutable access to the live shopping cart.
    pub const fn cart_mut(&mut self) -> &mut ShoppingCart {
        &mut self.cart
    }

    /// The login session.
    #[must_use]
    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// The underlying API client, for calls that bypass the slices
    /// (create/update/delete pass-throughs).
    #[must_use]
    pub const fn client(&self) -> &StoreClient {
        &self.client
    }
}

fn read_session_key(session: &dyn KeyValueStore, key: &str) -> Option<String> {
    match session.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted session");
            None
        }
    }
}

/// Rejected credentials surface the API's own message; transport and parse
/// failures surface the error display.
fn login_error_message(e: &ApiError) -> String {
    match e {
        ApiError::Status {
            message: Some(m), ..
        } => format!("Login failed: {m}"),
        other => format!("Login failed: {other}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use chaikart_core::Price;
    use std::path::Path;
    use std::time::Duration;

    fn test_config(base: &str, session_file: &Path) -> StoreConfig {
        StoreConfig {
            api_base_url: base.parse().unwrap(),
            http_timeout: Duration::from_secs(5),
            session_file: session_file.to_path_buf(),
        }
    }

    /// Nothing listens on this base URL; the connection is refused without
    /// any network traffic leaving the host.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn unreachable_store(session: Box<dyn KeyValueStore>) -> Store {
        // The session file path is never touched; Store::new takes the port.
        let config = test_config(UNREACHABLE, Path::new("unused-session.json"));
        Store::new(StoreClient::new(&config), session)
    }

    #[test]
    fn test_new_restores_session_from_port() {
        let port = MemoryStore::new();
        port.set(session_keys::TOKEN, "persisted-jwt").unwrap();
        port.set(session_keys::USERNAME, "mor_2314").unwrap();

        let store = unreachable_store(Box::new(port));

        assert!(store.auth().is_authenticated());
        assert_eq!(store.auth().user(), Some("mor_2314"));
        assert_eq!(store.auth().token(), Some("persisted-jwt"));
    }

    #[test]
    fn test_new_with_empty_port_is_logged_out() {
        let store = unreachable_store(Box::new(MemoryStore::new()));
        assert!(!store.auth().is_authenticated());
        assert_eq!(store.auth().user(), None);
    }

    #[test]
    fn test_logout_clears_state_and_persisted_keys() {
        let temp = tempfile::tempdir().unwrap();
        let session_file = temp.path().join("session.json");

        let seed = FileStore::new(&session_file);
        seed.set(session_keys::TOKEN, "jwt").unwrap();
        seed.set(session_keys::USERNAME, "johnd").unwrap();

        let config = test_config(UNREACHABLE, &session_file);
        let mut store = Store::from_config(&config);
        assert!(store.auth().is_authenticated());

        store.logout();

        assert!(!store.auth().is_authenticated());
        let reopened = FileStore::new(&session_file);
        assert_eq!(reopened.get(session_keys::TOKEN).unwrap(), None);
        assert_eq!(reopened.get(session_keys::USERNAME).unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_failure_lands_in_slice_not_result() {
        let mut store = unreachable_store(Box::new(MemoryStore::new()));

        store.load_products().await;

        assert!(!store.products().is_loading());
        let error = store.products().error().unwrap();
        assert!(
            error.starts_with("Failed to fetch products: "),
            "unexpected message: {error}"
        );
        assert!(store.products().list().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_clears_persisted_session() {
        let temp = tempfile::tempdir().unwrap();
        let session_file = temp.path().join("session.json");

        let seed = FileStore::new(&session_file);
        seed.set(session_keys::TOKEN, "old-jwt").unwrap();
        seed.set(session_keys::USERNAME, "johnd").unwrap();

        let config = test_config(UNREACHABLE, &session_file);
        let mut store = Store::from_config(&config);
        assert!(store.auth().is_authenticated());

        let authenticated = store.login("johnd", "wrong").await;

        assert!(!authenticated);
        assert!(!store.auth().is_authenticated());
        assert!(store.auth().error().unwrap().starts_with("Login failed: "));

        let reopened = FileStore::new(&session_file);
        assert_eq!(reopened.get(session_keys::TOKEN).unwrap(), None);
        assert_eq!(reopened.get(session_keys::USERNAME).unwrap(), None);
    }

    #[test]
    fn test_cart_access_through_store() {
        let mut store = unreachable_store(Box::new(MemoryStore::new()));

        let product = Product {
            id: chaikart_core::ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(10995),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: None,
        };

        store.cart_mut().add(&product);
        store.cart_mut().add(&product);

        assert_eq!(store.cart().total_quantity(), 2);
        assert_eq!(store.cart().total_price(), Price::from_cents(21990));
    }
}
