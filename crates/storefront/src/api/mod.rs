//! Fake Store API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, one method per endpoint
//! - The API is the source of truth - no local sync, direct calls
//! - Responses are read as text first so parse failures can be logged with
//!   the offending body
//!
//! # Example
//!
//! ```rust,ignore
//! use chaikart_storefront::api::StoreClient;
//! use chaikart_storefront::config::StoreConfig;
//!
//! let client = StoreClient::new(&StoreConfig::from_env()?);
//!
//! let products = client.products().await?;
//! let token = client.login("mor_2314", "83r5^_").await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use chaikart_core::{CartId, ProductId, UserId};

use crate::config::StoreConfig;

/// Errors that can occur when talking to the Fake Store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}{}", format_status_message(.message.as_deref()))]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Error message extracted from the response body, if any.
        message: Option<String>,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Login succeeded at the HTTP level but no token came back.
    #[error("No token received from server")]
    MissingToken,
}

fn format_status_message(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| format!(": {m}"))
}

/// Pull a human-readable message out of an error response body.
///
/// The API reports login failures as `{"message": "..."}`; other endpoints
/// return plain text. Falls back to the raw body, truncated.
fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(200).collect())
    }
}

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the Fake Store API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(StoreClientInner {
                http,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "Sending GET request");
        let response = self.inner.http.get(self.url(path)).send().await?;
        Self::read_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "Sending POST request");
        let response = self.inner.http.post(self.url(path)).json(body).send().await?;
        Self::read_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "Sending PUT request");
        let response = self.inner.http.put(self.url(path)).json(body).send().await?;
        Self::read_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "Sending DELETE request");
        let response = self.inner.http.delete(self.url(path)).send().await?;
        Self::read_response(response).await
    }

    /// Decode a response, reading the body as text first for diagnostics.
    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                message: extract_error_message(&response_text),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => {
                tracing::debug!(status = %status, "API request succeeded");
                Ok(value)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("products").await
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("products/{id}")).await
    }

    /// Get the list of category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.get("products/categories").await
    }

    /// Get the products in one category.
    ///
    /// Category names contain spaces and apostrophes ("men's clothing"), so
    /// the path segment is percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        self.get(&format!(
            "products/category/{}",
            urlencoding::encode(category)
        ))
        .await
    }

    /// Create a product. The API assigns and returns the new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.post("products", product).await
    }

    /// Update a product, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, product), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.put(&format!("products/{id}"), product).await
    }

    /// Delete a product, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.delete(&format!("products/{id}")).await
    }

    // =========================================================================
    // User Methods
    // =========================================================================

    /// Get all registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get("users").await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn user(&self, id: UserId) -> Result<User, ApiError> {
        self.get(&format!("users/{id}")).await
    }

    /// Create a user account. The API assigns and returns the new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, user))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post("users", user).await
    }

    /// Update a user, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, user), fields(id = %id))]
    pub async fn update_user(&self, id: UserId, user: &NewUser) -> Result<User, ApiError> {
        self.put(&format!("users/{id}"), user).await
    }

    /// Delete a user, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<User, ApiError> {
        self.delete(&format!("users/{id}")).await
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Get all server-side cart records.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn carts(&self) -> Result<Vec<Cart>, ApiError> {
        self.get("carts").await
    }

    /// Get a cart record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn cart(&self, id: CartId) -> Result<Cart, ApiError> {
        self.get(&format!("carts/{id}")).await
    }

    /// Get the cart records belonging to one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn user_carts(&self, user_id: UserId) -> Result<Vec<Cart>, ApiError> {
        self.get(&format!("carts/user/{user_id}")).await
    }

    /// Create a cart record. The API assigns and returns the new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, cart))]
    pub async fn create_cart(&self, cart: &NewCart) -> Result<Cart, ApiError> {
        self.post("carts", cart).await
    }

    /// Update a cart record, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, cart), fields(id = %id))]
    pub async fn update_cart(&self, id: CartId, cart: &NewCart) -> Result<Cart, ApiError> {
        self.put(&format!("carts/{id}"), cart).await
    }

    /// Delete a cart record, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_cart(&self, id: CartId) -> Result<Cart, ApiError> {
        self.delete(&format!("carts/{id}")).await
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Log in with username and password, returning the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on bad credentials (the API answers 401
    /// with a message body) and [`ApiError::MissingToken`] if the response
    /// carries no token.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("auth/login", &credentials).await?;

        if response.token.is_empty() {
            return Err(ApiError::MissingToken);
        }

        Ok(response.token)
    }
}
