//! Chaikart storefront library.
//!
//! This crate provides the storefront functionality as a library: the Fake
//! Store API client, the shopping cart, the login session, and the [`Store`]
//! that ties them together for a frontend to drive.
//!
//! # Architecture
//!
//! - [`api::StoreClient`] talks to the remote API and returns typed results
//! - [`cart::ShoppingCart`] and [`session::AuthState`] are pure state, no I/O
//! - [`store::Store`] owns both and runs the request lifecycle: every fetch
//!   flips a loading flag on, lands data or an error message, and flips it off
//! - [`persist`] keeps the login session on disk between runs
//!
//! [`Store`]: store::Store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod persist;
pub mod session;
pub mod store;
