//! Client-side shopping cart.
//!
//! The cart is pure state: no I/O, no locking, just lines and running
//! totals. Totals are maintained incrementally on every mutation rather than
//! recomputed, and always equal the sums over the lines.

use chaikart_core::{Price, ProductId};

use crate::api::types::Product;

/// One line in the shopping cart.
///
/// Title, price, and image are snapshots taken when the product was first
/// added. A later catalog refresh does not reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Referenced product.
    pub product_id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Unit price at add time.
    pub price: Price,
    /// Image URL at add time.
    pub image: String,
    /// Units of this product. Always at least 1; a line at 0 is removed.
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart: lines plus running totals.
///
/// `total_quantity` and `total_price` are updated in the same mutation that
/// changes the lines, so they never need recomputing and never disagree with
/// the line sums.
#[derive(Debug, Clone, Default)]
pub struct ShoppingCart {
    items: Vec<LineItem>,
    total_quantity: u32,
    total_price: Price,
}

impl ShoppingCart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the total grows by the snapshotted unit price. Otherwise a new line is
    /// created with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += 1;
            self.total_quantity += 1;
            self.total_price += item.price;
        } else {
            self.items.push(LineItem {
                product_id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity: 1,
            });
            self.total_quantity += 1;
            self.total_price += product.price;
        }
    }

    /// Remove a product's entire line.
    ///
    /// No-op if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) {
        if let Some(index) = self.items.iter().position(|i| i.product_id == id) {
            let item = self.items.remove(index);
            self.total_quantity -= item.quantity;
            self.total_price -= item.line_total();
        }
    }

    /// Set the quantity of a line.
    ///
    /// Setting 0 removes the line. No-op if the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == id) {
            let old = item.quantity;
            item.quantity = quantity;
            if quantity >= old {
                let added = quantity - old;
                self.total_quantity += added;
                self.total_price += item.price.times(added);
            } else {
                let removed = old - quantity;
                self.total_quantity -= removed;
                self.total_price -= item.price.times(removed);
            }
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_quantity = 0;
        self.total_price = Price::zero();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub const fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Total price across all lines.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total_price
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            description: String::new(),
            category: "electronics".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            rating: None,
        }
    }

    /// Recompute totals from the lines and compare with the running totals.
    fn assert_totals_consistent(cart: &ShoppingCart) {
        let quantity: u32 = cart.items().iter().map(|i| i.quantity).sum();
        let price: Price = cart.items().iter().map(LineItem::line_total).sum();
        assert_eq!(cart.total_quantity(), quantity);
        assert_eq!(cart.total_price(), price);
    }

    #[test]
    fn test_add_same_product_twice_merges_lines() {
        let mut cart = ShoppingCart::new();
        let p = product(1, 1000);

        cart.add(&p);
        cart.add(&p);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(p.id).unwrap().quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price(), Price::from_cents(2000));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_add_distinct_products() {
        let mut cart = ShoppingCart::new();
        cart.add(&product(1, 1000));
        cart.add(&product(2, 550));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price(), Price::from_cents(1550));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_add_snapshots_price_at_first_add() {
        let mut cart = ShoppingCart::new();
        let mut p = product(1, 1000);
        cart.add(&p);

        // Catalog repriced between adds; the line keeps its original price.
        p.price = Price::from_cents(9999);
        cart.add(&p);

        assert_eq!(cart.get(p.id).unwrap().price, Price::from_cents(1000));
        assert_eq!(cart.total_price(), Price::from_cents(2000));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_remove_subtracts_whole_line() {
        let mut cart = ShoppingCart::new();
        let p1 = product(1, 1000);
        let p2 = product(2, 500);
        cart.add(&p1);
        cart.add(&p1);
        cart.add(&p2);

        cart.remove(p1.id);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_price(), Price::from_cents(500));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut cart = ShoppingCart::new();
        cart.add(&product(1, 1000));

        cart.remove(ProductId::new(42));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_up_and_down() {
        let mut cart = ShoppingCart::new();
        let p = product(1, 1000);
        cart.add(&p);

        cart.set_quantity(p.id, 5);
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.total_price(), Price::from_cents(5000));

        cart.set_quantity(p.id, 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price(), Price::from_cents(2000));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = ShoppingCart::new();
        let p = product(1, 1000);
        cart.add(&p);
        cart.add(&product(2, 500));

        cart.set_quantity(p.id, 0);

        assert!(cart.get(p.id).is_none());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_price(), Price::from_cents(500));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_set_quantity_absent_product_is_noop() {
        let mut cart = ShoppingCart::new();
        cart.add(&product(1, 1000));

        cart.set_quantity(ProductId::new(42), 3);

        assert_eq!(cart.total_quantity(), 1);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = ShoppingCart::new();
        cart.add(&product(1, 1000));
        cart.add(&product(2, 500));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_totals_stay_consistent_across_mixed_operations() {
        let mut cart = ShoppingCart::new();
        let p1 = product(1, 1099);
        let p2 = product(2, 2250);
        let p3 = product(3, 99);

        cart.add(&p1);
        cart.add(&p2);
        cart.add(&p2);
        cart.add(&p3);
        cart.set_quantity(p2.id, 7);
        cart.remove(p1.id);
        cart.set_quantity(p3.id, 0);
        cart.add(&p1);

        assert_totals_consistent(&cart);
        assert_eq!(cart.total_quantity(), 8);
        assert_eq!(
            cart.total_price(),
            Price::from_cents(7 * 2250 + 1099)
        );
    }
}
