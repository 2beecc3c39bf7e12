//! User browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List every user
//! chaikart users
//!
//! # Show one user in detail
//! chaikart user 1
//! ```

use chaikart_core::UserId;
use chaikart_storefront::api::types::User;
use chaikart_storefront::error::{AppError, Result};

/// List users.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the fetch settles
/// with an error on the users slice.
pub async fn list() -> Result<()> {
    let mut store = super::open_store()?;

    store.load_users().await;
    if let Some(message) = store.users().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    #[allow(clippy::print_stdout)]
    {
        for user in store.users().list() {
            println!(
                "{:>4}  {:<16}  {:<24}  {} {}",
                user.id.as_i64(),
                user.username,
                user.email,
                user.name.firstname,
                user.name.lastname
            );
        }
        println!("{} users", store.users().list().len());
    }
    Ok(())
}

/// Show one user in detail.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the fetch settles with
/// an error, or the user does not exist.
pub async fn show(id: UserId) -> Result<()> {
    let mut store = super::open_store()?;

    store.load_user(id).await;
    if let Some(message) = store.users().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    let user = store
        .users()
        .selected()
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
    print_user_detail(user);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_user_detail(user: &User) {
    println!("{} (ID {})", user.username, user.id);
    println!("  Name:   {} {}", user.name.firstname, user.name.lastname);
    println!("  Email:  {}", user.email);
    if let Some(phone) = &user.phone {
        println!("  Phone:  {phone}");
    }
    if let Some(address) = &user.address {
        println!(
            "  Address: {} {}, {} {}",
            address.number, address.street, address.city, address.zipcode
        );
    }
}
