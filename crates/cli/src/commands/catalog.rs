//! Product and category browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List every product, or one category's
//! chaikart products
//! chaikart products --category "men's clothing"
//!
//! # Show one product in detail
//! chaikart product 1
//!
//! # List the category names
//! chaikart categories
//! ```

use chaikart_core::ProductId;
use chaikart_storefront::api::types::Product;
use chaikart_storefront::error::{AppError, Result};

/// List products, optionally restricted to one category.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the fetch settles
/// with an error on the products slice.
pub async fn products(category: Option<&str>) -> Result<()> {
    let mut store = super::open_store()?;

    match category {
        Some(name) => store.load_products_in_category(name).await,
        None => store.load_products().await,
    }
    if let Some(message) = store.products().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    print_product_list(store.products().list());
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the fetch settles with
/// an error, or the product does not exist.
pub async fn product(id: ProductId) -> Result<()> {
    let mut store = super::open_store()?;

    store.load_product(id).await;
    if let Some(message) = store.products().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    let product = store
        .products()
        .selected()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    print_product_detail(product);
    Ok(())
}

/// List the category names.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the fetch settles
/// with an error on the categories slice.
pub async fn categories() -> Result<()> {
    let mut store = super::open_store()?;

    store.load_categories().await;
    if let Some(message) = store.categories().error() {
        return Err(AppError::Fetch(message.to_owned()));
    }

    #[allow(clippy::print_stdout)]
    {
        for name in store.categories().list() {
            println!("{name}");
        }
    }
    Ok(())
}

/// Print a one-line-per-product listing. Shared with the shell.
#[allow(clippy::print_stdout)]
pub(crate) fn print_product_list(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        // Width specifiers need the raw values; the newtype Display impls
        // do not forward padding.
        let price = product.price.to_string();
        println!(
            "{:>4}  {price:>9}  {}  [{}]",
            product.id.as_i64(),
            product.title,
            product.category
        );
    }
    println!("{} products", products.len());
}

/// Print one product in detail. Shared with the shell.
#[allow(clippy::print_stdout)]
pub(crate) fn print_product_detail(product: &Product) {
    println!("{}", product.title);
    println!("  ID:        {}", product.id);
    println!("  Price:     {}", product.price);
    println!("  Category:  {}", product.category);
    if let Some(rating) = &product.rating {
        println!("  Rating:    {:.1} ({} ratings)", rating.rate, rating.count);
    }
    println!("  Image:     {}", product.image);
    println!();
    println!("  {}", product.description);
}
