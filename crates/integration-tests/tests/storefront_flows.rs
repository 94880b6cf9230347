//! Whole shopping flows across the catalog, cart, quantity widget, and
//! checkout summary, using the seeded demo catalog and no live HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::dec;

use kuchostore_core::ProductId;
use kuchostore_storefront::cart::CartStore;
use kuchostore_storefront::catalog::{CatalogProvider, StaticCatalog};
use kuchostore_storefront::checkout::{CheckoutSummary, order_details};
use kuchostore_storefront::quantity::QuantityField;

#[tokio::test]
async fn test_browse_add_and_checkout() {
    let catalog = StaticCatalog::seed();
    let mut cart = CartStore::new();

    let shirt = catalog
        .product_by_id(&ProductId::new("1"))
        .await
        .unwrap()
        .unwrap();
    cart.add_or_set_quantity(&shirt, 2);

    assert_eq!(cart.total_item_count(), 2);
    assert_eq!(cart.subtotal(), dec!(49.98));

    let summary = CheckoutSummary::new(cart.items());
    assert_eq!(summary.total(), dec!(49.98));
    assert_eq!(summary.display_total(), "$49.98");
}

#[tokio::test]
async fn test_replacing_quantity_reprices_the_order() {
    let catalog = StaticCatalog::seed();
    let mut cart = CartStore::new();

    let shirt = catalog
        .product_by_id(&ProductId::new("1"))
        .await
        .unwrap()
        .unwrap();
    cart.add_or_set_quantity(&shirt, 2);
    cart.add_or_set_quantity(&shirt, 5);

    assert_eq!(cart.len(), 1);
    assert_eq!(CheckoutSummary::new(cart.items()).total(), dec!(124.95));
}

#[tokio::test]
async fn test_multi_line_cart_totals() {
    let catalog = StaticCatalog::seed();
    let products = catalog.products().await.unwrap();
    let mut cart = CartStore::new();

    // 12.99 * 1 + 15.99 * 2 = 44.97
    cart.add_or_set_quantity(&products[1], 1);
    cart.add_or_set_quantity(&products[3], 2);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_item_count(), 3);
    assert_eq!(cart.subtotal(), dec!(44.97));
    assert_eq!(CheckoutSummary::new(cart.items()).total(), cart.subtotal());
}

#[tokio::test]
async fn test_order_payload_mirrors_cart_and_leaves_it_intact() {
    let catalog = StaticCatalog::seed();
    let products = catalog.products().await.unwrap();
    let mut cart = CartStore::new();

    cart.add_or_set_quantity(&products[0], 2);
    cart.add_or_set_quantity(&products[4], 1);

    let details = order_details(cart.items());
    let lines = details["cart"].as_array().unwrap();

    assert_eq!(lines.len(), cart.len());
    assert_eq!(lines[0]["productId"], "1");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[1]["productId"], "5");
    assert_eq!(lines[1]["quantity"], 1);

    // Confirming an order derives a payload; it never drains the cart.
    assert_eq!(cart.total_item_count(), 3);
    assert_eq!(cart.subtotal(), dec!(69.97));
}

#[tokio::test]
async fn test_quantity_widget_drives_the_cart_line() {
    let catalog = StaticCatalog::seed();
    let mut cart = CartStore::new();

    let bed = catalog
        .product_by_id(&ProductId::new("3"))
        .await
        .unwrap()
        .unwrap();
    cart.add_or_set_quantity(&bed, 2);

    // Widget starts from the cart line's committed quantity.
    let mut field = QuantityField::new(cart.quantity(&bed.id));

    // User clears the field: nothing commits, the cart is untouched.
    assert_eq!(field.input(""), None);
    assert_eq!(cart.quantity(&bed.id), 2);

    // Focus leaves the empty field: falls back to 1 and the cart follows.
    let committed = field.blur().unwrap();
    cart.add_or_set_quantity(&bed, committed);
    assert_eq!(cart.quantity(&bed.id), 1);

    // Typing 0 commits and removes the line.
    let committed = field.input("0").unwrap();
    cart.add_or_set_quantity(&bed, committed);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_stepper_respects_stock_ceiling() {
    let catalog = StaticCatalog::seed();
    let mut cart = CartStore::new();

    // Product 3 has 20 in stock.
    let bed = catalog
        .product_by_id(&ProductId::new("3"))
        .await
        .unwrap()
        .unwrap();
    cart.add_or_set_quantity(&bed, 20);

    let mut field = QuantityField::new(cart.quantity(&bed.id));
    let committed = field.increment(bed.stock);
    cart.add_or_set_quantity(&bed, committed);

    assert_eq!(cart.quantity(&bed.id), 20);
}
