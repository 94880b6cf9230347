//! The in-memory shopping cart.
//!
//! One [`CartStore`] exists per session and is the only authority on cart
//! contents. Every page that shows or changes the cart goes through its
//! operations; totals are recomputed from the line items on every call, so
//! there is no cached value to go stale.

use rust_decimal::Decimal;
use tracing::debug;

use kuchostore_core::{CartItem, Product, ProductId, money};

/// The authoritative in-memory cart for the current session.
///
/// Line items keep insertion order and are unique by product id: setting a
/// quantity for a product already in the cart overwrites that line in place
/// rather than appending a duplicate.
///
/// Quantities use replace semantics ("set to N", never "+N"). A call site
/// that wants to increment reads [`CartStore::quantity`] first and passes
/// the sum.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Set the quantity for a product, inserting the line if absent.
    ///
    /// A quantity of `0` behaves exactly as [`CartStore::remove`]: a line
    /// with zero units never exists in the cart. Quantities above the
    /// product's stock are capped at the stock ceiling; the cap is applied
    /// here so every entry point (product card, detail page, cart line,
    /// stepper) gets the same policy.
    ///
    /// Returns the updated line items.
    pub fn add_or_set_quantity(&mut self, product: &Product, quantity: u32) -> &[CartItem] {
        if quantity == 0 {
            self.remove(&product.id);
            return &self.items;
        }

        let quantity = quantity.min(product.stock);
        if quantity < 1 {
            // Out-of-stock product: nothing to add.
            debug!(product_id = %product.id, "ignoring add for out-of-stock product");
            self.remove(&product.id);
            return &self.items;
        }

        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = quantity,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }

        &self.items
    }

    /// Remove the line for a product id.
    ///
    /// A no-op (not an error) if the product is not in the cart, so the
    /// operation is idempotent.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|i| &i.product.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The quantity currently in the cart for a product, 0 if absent.
    ///
    /// Pre-populates per-product quantity widgets so a product card shows
    /// what is already in the cart.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| &i.product.id == id)
            .map_or(0, |i| i.quantity)
    }

    /// Sum of all line quantities. Drives the cart badge counter.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines, in full precision.
    ///
    /// Rounding happens only in [`CartStore::display_subtotal`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_subtotal).sum()
    }

    /// The subtotal formatted for display, rounded to 2 decimal places.
    #[must_use]
    pub fn display_subtotal(&self) -> String {
        money::display(self.subtotal())
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
