//! Interactive shopping session.
//!
//! # Usage
//!
//! ```bash
//! chaikart shell
//! ```
//!
//! The shell owns one [`Store`] for the whole session, so the in-memory
//! cart survives between prompts; one-shot commands start from an empty
//! cart every time. A typical session:
//!
//! ```text
//! chaikart> products electronics
//! chaikart> add 9
//! chaikart> qty 9 3
//! chaikart> cart
//! chaikart> login mor_2314 83r5^_
//! chaikart> quit
//! ```
//!
//! [`Store`]: chaikart_storefront::store::Store

use std::io::Write;

use chaikart_core::ProductId;
use chaikart_storefront::cart::ShoppingCart;
use chaikart_storefront::error::Result;
use chaikart_storefront::store::Store;

use super::catalog;

/// Run the interactive shell until EOF or `quit`.
///
/// # Errors
///
/// Returns an error when the environment configuration is invalid. Fetch
/// failures inside the shell are printed and do not end the session.
pub async fn run() -> Result<()> {
    let mut store = super::open_store()?;

    #[allow(clippy::print_stdout)]
    {
        println!("Chaikart interactive shell. Type 'help' for commands, 'quit' to leave.");
        if let Some(user) = store.auth().user() {
            println!("Logged in as {user}.");
        }
    }

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        prompt();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                break;
            }
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        if matches!(command, "quit" | "exit") {
            break;
        }
        dispatch(&mut store, command, &args).await;
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn prompt() {
    print!("chaikart> ");
    let _ = std::io::stdout().flush();
}

#[allow(clippy::print_stdout)]
async fn dispatch(store: &mut Store, command: &str, args: &[&str]) {
    match command {
        "help" => print_help(),
        "products" => {
            if args.is_empty() {
                store.load_products().await;
            } else {
                // Category names can contain spaces ("men's clothing")
                let category = args.join(" ");
                store.load_products_in_category(&category).await;
            }
            match store.products().error() {
                Some(message) => println!("{message}"),
                None => catalog::print_product_list(store.products().list()),
            }
        }
        "product" => {
            let Some(id) = parse_id(args) else {
                println!("usage: product <product-id>");
                return;
            };
            store.load_product(id).await;
            match (store.products().error(), store.products().selected()) {
                (Some(message), _) => println!("{message}"),
                (None, Some(product)) => catalog::print_product_detail(product),
                (None, None) => println!("No product {id}"),
            }
        }
        "categories" => {
            store.load_categories().await;
            match store.categories().error() {
                Some(message) => println!("{message}"),
                None => {
                    for name in store.categories().list() {
                        println!("{name}");
                    }
                }
            }
        }
        "add" => {
            let Some(id) = parse_id(args) else {
                println!("usage: add <product-id>");
                return;
            };
            store.load_product(id).await;
            if let Some(message) = store.products().error() {
                println!("{message}");
            } else if let Some(product) = store.products().selected().cloned() {
                store.cart_mut().add(&product);
                println!("Added {}", product.title);
                print_cart_totals(store.cart());
            } else {
                println!("No product {id}");
            }
        }
        "rm" => {
            let Some(id) = parse_id(args) else {
                println!("usage: rm <product-id>");
                return;
            };
            store.cart_mut().remove(id);
            print_cart_totals(store.cart());
        }
        "qty" => {
            let Some((id, quantity)) = parse_quantity(args) else {
                println!("usage: qty <product-id> <quantity>");
                return;
            };
            store.cart_mut().set_quantity(id, quantity);
            print_cart_totals(store.cart());
        }
        "cart" => print_cart(store.cart()),
        "clear" => {
            store.cart_mut().clear();
            println!("Cart cleared.");
        }
        "login" => {
            let (Some(username), Some(password)) = (args.first(), args.get(1)) else {
                println!("usage: login <username> <password>");
                return;
            };
            if store.login(username, password).await {
                println!("Logged in as {username}");
            } else {
                println!("{}", store.auth().error().unwrap_or("Login failed"));
            }
        }
        "logout" => {
            store.logout();
            println!("Logged out");
        }
        "whoami" => match store.auth().user() {
            Some(user) => println!("{user}"),
            None => println!("Not logged in"),
        },
        _ => println!("Unknown command: {command} (try 'help')"),
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &ShoppingCart) {
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in cart.items() {
        let line_total = item.line_total().to_string();
        println!(
            "{:>4}  {line_total:>9}  {} x{}",
            item.product_id.as_i64(),
            item.title,
            item.quantity
        );
    }
    print_cart_totals(cart);
}

#[allow(clippy::print_stdout)]
fn print_cart_totals(cart: &ShoppingCart) {
    println!(
        "Cart: {} items, total {}",
        cart.total_quantity(),
        cart.total_price()
    );
}

#[allow(clippy::print_stdout)]
fn print_help() {
    println!("Commands:");
    println!("  products [category]    List products, optionally one category's");
    println!("  product <id>           Show one product");
    println!("  categories             List the category names");
    println!("  add <id>               Add a product to the cart");
    println!("  rm <id>                Remove a cart line");
    println!("  qty <id> <n>           Set a cart line's quantity (0 removes)");
    println!("  cart                   Show the cart");
    println!("  clear                  Empty the cart");
    println!("  login <user> <pass>    Log in and persist the session");
    println!("  logout                 Log out and clear the session");
    println!("  whoami                 Show who is logged in");
    println!("  quit                   Leave the shell");
}

fn parse_id(args: &[&str]) -> Option<ProductId> {
    args.first()
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(ProductId::new)
}

fn parse_quantity(args: &[&str]) -> Option<(ProductId, u32)> {
    let id = args.first().and_then(|raw| raw.parse::<i64>().ok())?;
    let quantity = args.get(1).and_then(|raw| raw.parse::<u32>().ok())?;
    Some((ProductId::new(id), quantity))
}
