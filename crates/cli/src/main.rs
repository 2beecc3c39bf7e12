//! Chaikart CLI - a command-line storefront over the Fake Store API.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! chaikart products
//! chaikart products --category "men's clothing"
//! chaikart product 1
//! chaikart categories
//!
//! # Browse users and server-side cart records
//! chaikart users
//! chaikart user 1
//! chaikart carts --user 1
//!
//! # Manage the persisted session
//! chaikart login mor_2314 '83r5^_'
//! chaikart whoami
//! chaikart logout
//!
//! # Interactive shopping session (the live cart lives here)
//! chaikart shell
//! ```
//!
//! # Commands
//!
//! - `products` / `product` / `categories` - Browse the catalog
//! - `users` / `user` - Browse users
//! - `carts` / `cart` - Browse server-side cart records
//! - `login` / `logout` / `whoami` - Manage the persisted session
//! - `shell` - Interactive shopping session with a live cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use chaikart_core::{CartId, ProductId, UserId};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chaikart")]
#[command(author, version, about = "Chaikart storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only list products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: i64,
    },
    /// List the product categories
    Categories,
    /// List users
    Users,
    /// Show one user
    User {
        /// User ID
        id: i64,
    },
    /// List server-side cart records
    Carts {
        /// Only list carts belonging to this user
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Show one server-side cart record
    Cart {
        /// Cart ID
        id: i64,
    },
    /// Log in and persist the session
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Interactive shopping session (browse, fill a cart, log in)
    Shell,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chaikart_cli=info,chaikart_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { category } => {
            commands::catalog::products(category.as_deref()).await?;
        }
        Commands::Product { id } => commands::catalog::product(ProductId::new(id)).await?,
        Commands::Categories => commands::catalog::categories().await?,
        Commands::Users => commands::users::list().await?,
        Commands::User { id } => commands::users::show(UserId::new(id)).await?,
        Commands::Carts { user } => commands::carts::list(user.map(UserId::new)).await?,
        Commands::Cart { id } => commands::carts::show(CartId::new(id)).await?,
        Commands::Login { username, password } => {
            commands::session::login(&username, &password).await?;
        }
        Commands::Logout => commands::session::logout()?,
        Commands::Whoami => commands::session::whoami()?,
        Commands::Shell => commands::shell::run().await?,
    }
    Ok(())
}
