//! Server-side cart record browsing commands.
//!
//! These are the persisted cart records the Fake Store API serves, not the
//! live shopping cart (that one lives in `chaikart shell`).
//!
//! # Usage
//!
//! ```bash
//! # List every cart record, or one user's
//! chaikart carts
//! chaikart carts --user 1
//!
//! # Show one cart record
//! chaikart cart 5
//! ```

use chaikart_core::{CartId, UserId};
use chaikart_storefront::api::types::Cart;
use chaikart_storefront::error::{AppError, Result};

/// List cart records, optionally restricted to one user.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the fetch settles
/// with an error on the carts slice.
pub async fn list(user: Option<UserId>) -> Result<()> {
    let mut store = super::open_store()?;

    let records = match user {
        Some(user_id) => {
            store.load_user_carts(user_id).await;
            if let Some(message) = store.carts().error() {
                return Err(AppError::Fetch(message.to_owned()));
            }
            store.carts().user_carts()
        }
        None => {
            store.load_carts().await;
            if let Some(message) = store.carts().error() {
                return Err(AppError::Fetch(message.to_owned()));
            }
            store.carts().list()
        }
    };

    #[allow(clippy::print_stdout)]
    {
        for cart in records {
            print_cart_record(cart);
        }
        println!("{} carts", records.len());
    }
    Ok(())
}

/// Show one cart record.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the fetch settles with
/// an error, or the cart does not exist.
pub async fn show(id: CartId) -> Result<()> {
    let mut store = super::open_store()?;

    store.load_cart(id).await;
    if let Some(message) = store.carts().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    let cart = store
        .carts()
        .selected()
        .ok_or_else(|| AppError::NotFound(format!("cart {id}")))?;
    print_cart_record(cart);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart_record(cart: &Cart) {
    println!(
        "Cart {}  user {}  {}",
        cart.id,
        cart.user_id,
        cart.date.format("%Y-%m-%d")
    );
    for entry in &cart.products {
        println!("    product {} x{}", entry.product_id, entry.quantity);
    }
}
