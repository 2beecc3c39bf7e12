//! Command implementations for the Chaikart CLI.
//!
//! # Commands
//!
//! - `catalog` - Product and category browsing
//! - `users` - User browsing
//! - `carts` - Server-side cart record browsing
//! - `session` - Login, logout, whoami
//! - `shell` - Interactive shopping session
//!
//! One-shot commands construct a [`Store`] from the environment, run one
//! load operation, and lift the slice outcome into a `Result`. The shell
//! keeps a single `Store` alive so the in-memory cart survives between
//! prompts.
//!
//! [`Store`]: chaikart_storefront::store::Store

pub mod carts;
pub mod catalog;
pub mod session;
pub mod shell;
pub mod users;

use chaikart_storefront::config::StoreConfig;
use chaikart_storefront::error::Result;
use chaikart_storefront::store::Store;

/// Construct a store from the environment configuration.
///
/// # Errors
///
/// Returns an error when the environment configuration is invalid.
pub fn open_store() -> Result<Store> {
    let config = StoreConfig::from_env()?;
    Ok(Store::from_config(&config))
}
