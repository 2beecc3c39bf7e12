//! Session commands: login, logout, whoami.
//!
//! # Usage
//!
//! ```bash
//! chaikart login mor_2314 '83r5^_'
//! chaikart whoami
//! chaikart logout
//! ```
//!
//! # Environment Variables
//!
//! - `CHAIKART_SESSION_FILE` - Where the session (token and username) is
//!   persisted between invocations. Defaults to the platform config dir.

use chaikart_storefront::error::{AppError, Result};

/// Log in against the API and persist the session.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the credentials are
/// rejected; the message is the one the session shaped.
pub async fn login(username: &str, password: &str) -> Result<()> {
    let mut store = super::open_store()?;

    if store.login(username, password).await {
        #[allow(clippy::print_stdout)]
        {
            println!("Logged in as {username}");
        }
        Ok(())
    } else {
        let message = store.auth().error().unwrap_or("Login failed").to_owned();
        Err(AppError::Login(message))
    }
}

/// Log out and clear the persisted session.
///
/// # Errors
///
/// Returns an error when configuration is invalid.
pub fn logout() -> Result<()> {
    let mut store = super::open_store()?;
    store.logout();

    #[allow(clippy::print_stdout)]
    {
        println!("Logged out");
    }
    Ok(())
}

/// Show who is logged in, from the persisted session.
///
/// # Errors
///
/// Returns an error when configuration is invalid.
pub fn whoami() -> Result<()> {
    let store = super::open_store()?;

    #[allow(clippy::print_stdout)]
    {
        match store.auth().user() {
            Some(user) => println!("{user}"),
            None => println!("Not logged in"),
        }
    }
    Ok(())
}
