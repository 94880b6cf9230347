//! Money display helpers.
//!
//! Cart arithmetic runs in full [`Decimal`] precision; rounding to two
//! decimal places happens only here, at the presentation edge.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to 2 decimal places for display.
///
/// Midpoints round away from zero, matching how the storefront has always
/// shown prices.
#[must_use]
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as a `$`-prefixed price string, e.g. `$24.99`.
#[must_use]
pub fn display(amount: Decimal) -> String {
    format!("${:.2}", round_display(amount))
}
