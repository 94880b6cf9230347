//! Catalog product and cart line-item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Product category, serialized kebab-case to match the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Clothing,
    Accessories,
    Toys,
    HomeDecor,
    Furniture,
}

impl Category {
    /// The kebab-case slug used in URLs and API payloads.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Clothing => "clothing",
            Self::Accessories => "accessories",
            Self::Toys => "toys",
            Self::HomeDecor => "home-decor",
            Self::Furniture => "furniture",
        }
    }
}

/// A catalog product.
///
/// Immutable once loaded from the catalog provider within a session. The
/// price is carried as a [`Decimal`] so cart arithmetic never accumulates
/// floating point error; the catalog API transports it as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price in the store currency. Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Primary image URL.
    pub image_url: String,
    /// Product category.
    pub category: Category,
    /// Units available. Quantity in a cart is capped at this value.
    pub stock: u32,
}

/// One line item in a cart: a product and how many units of it.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero is
/// removed from the cart, never retained at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to.
    pub product: Product,
    /// Units of the product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity` for this line, in full precision.
    #[must_use]
    pub fn line_subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
