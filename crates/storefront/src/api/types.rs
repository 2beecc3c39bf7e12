//! Domain types for the Fake Store API.
//!
//! These mirror the JSON documents the API serves. Field names follow Rust
//! conventions; `serde(rename)` bridges the camelCase the wire uses.

use chaikart_core::{CartId, Price, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// A product in the store catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Long-form description.
    pub description: String,
    /// Category name (e.g., "electronics").
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Aggregate customer rating, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// Payload for creating or updating a product. The API assigns the ID.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Long-form description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Image URL.
    pub image: String,
}

// =============================================================================
// User Types
// =============================================================================

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Login username.
    pub username: String,
    /// Password as the demo API serves it (plain text).
    pub password: String,
    /// Structured name.
    pub name: FullName,
    /// Postal address, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Phone number, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// First and last name of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullName {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
}

/// Postal address of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// City name.
    pub city: String,
    /// Street name.
    pub street: String,
    /// House number.
    pub number: u32,
    /// Postal code.
    pub zipcode: String,
    /// Coordinates.
    pub geolocation: Geolocation,
}

/// Coordinates as the API serves them (decimal strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geolocation {
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub long: String,
}

/// Payload for creating or updating a user. The API assigns the ID.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Login username.
    pub username: String,
    /// Password.
    pub password: String,
}

// =============================================================================
// Cart Types
// =============================================================================

/// A server-side cart record (historical order data, not the live cart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Owning user.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// When the cart was recorded.
    pub date: DateTime<Utc>,
    /// Product entries.
    pub products: Vec<CartProduct>,
}

/// A product entry inside a server-side cart record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Referenced product.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Units of that product.
    pub quantity: u32,
}

/// Payload for creating or updating a server-side cart record.
#[derive(Debug, Clone, Serialize)]
pub struct NewCart {
    /// Owning user.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// When the cart was recorded. The API echoes this back, so it must be
    /// present for the response to round-trip into a [`Cart`].
    pub date: DateTime<Utc>,
    /// Product entries.
    pub products: Vec<CartProduct>,
}

// =============================================================================
// Auth Types
// =============================================================================

/// Login request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the session.
    pub token: String,
}
