//! Checkout summary: pure totals over the current cart.
//!
//! Everything here recomputes from the line items on every call; there is
//! no memoized total that could go stale after a cart mutation. The only
//! side effect lives in [`confirm_order`], which reports the cart to the
//! audit sink and deliberately stops there: no order persistence, no
//! payment step, and the cart is left untouched.

use rust_decimal::Decimal;
use serde_json::json;

use kuchostore_core::{CartItem, LogId, UserId, money};

use crate::audit::{AuditClient, AuditError};

/// Audit action name recorded when the user confirms an order.
pub const CONFIRM_ORDER_ACTION: &str = "CONFIRM_ORDER";

/// `price * quantity` for one line, in full precision.
#[must_use]
pub fn line_subtotal(item: &CartItem) -> Decimal {
    item.line_subtotal()
}

/// Pluggable fee seam. The storefront has no tax or shipping model, so the
/// default calculator charges nothing and `total == subtotal`.
pub trait FeeCalculator {
    /// Fees to add on top of the given subtotal.
    fn fee(&self, subtotal: Decimal) -> Decimal;
}

/// The default fee model: none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFees;

impl FeeCalculator for NoFees {
    fn fee(&self, _subtotal: Decimal) -> Decimal {
        Decimal::ZERO
    }
}

/// Derived view over a snapshot of cart line items.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSummary<'a, F = NoFees> {
    items: &'a [CartItem],
    fees: F,
}

impl<'a> CheckoutSummary<'a> {
    /// Summary with the default (empty) fee model.
    #[must_use]
    pub const fn new(items: &'a [CartItem]) -> Self {
        Self {
            items,
            fees: NoFees,
        }
    }
}

impl<'a, F: FeeCalculator> CheckoutSummary<'a, F> {
    /// Summary with a custom fee model.
    #[must_use]
    pub const fn with_fees(items: &'a [CartItem], fees: F) -> Self {
        Self { items, fees }
    }

    /// Sum of line subtotals, in full precision.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(line_subtotal).sum()
    }

    /// Subtotal plus fees. Equals the subtotal under [`NoFees`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        let subtotal = self.subtotal();
        subtotal + self.fees.fee(subtotal)
    }

    /// The total formatted for display, rounded to 2 decimal places.
    #[must_use]
    pub fn display_total(&self) -> String {
        money::display(self.total())
    }
}

/// The `{ "cart": [{ "productId", "quantity" }, ...] }` payload attached to
/// a confirmed-order audit record.
#[must_use]
pub fn order_details(items: &[CartItem]) -> serde_json::Value {
    json!({
        "cart": items
            .iter()
            .map(|item| {
                json!({
                    "productId": item.product.id,
                    "quantity": item.quantity,
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// Report a confirmed order to the audit sink and return the assigned log id.
///
/// Posts exactly one `USER_ACTION` record with the cart's product id and
/// quantity pairs. Does not clear the cart or transition any further state.
///
/// # Errors
///
/// Returns [`AuditError`] if the sink cannot be reached or rejects the
/// record; the cart is unaffected either way.
pub async fn confirm_order(
    items: &[CartItem],
    user_id: UserId,
    audit: &AuditClient,
) -> Result<LogId, AuditError> {
    let saved = audit
        .log_user_action(user_id, CONFIRM_ORDER_ACTION, order_details(items))
        .await?;
    Ok(saved.log_id)
}
