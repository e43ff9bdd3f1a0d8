//! Section 87A rebate.
//!
//! At or below the threshold the rebate cancels tax up to a cap. One rupee
//! above the threshold it vanishes entirely; there is no phase-out.

use rust_decimal::Decimal;

use crate::calculations::common::{min, non_negative};
use crate::models::RegimeConfig;

/// Rebate available on `tax_before_rebate`.
pub fn compute_rebate(
    taxable_income: Decimal,
    tax_before_rebate: Decimal,
    config: &RegimeConfig,
) -> Decimal {
    if taxable_income <= config.rebate_threshold {
        non_negative(min(tax_before_rebate, config.rebate_max_amount))
    } else {
        Decimal::ZERO
    }
}

/// Tax left after the rebate, never negative.
pub fn apply_rebate(
    tax_before_rebate: Decimal,
    rebate: Decimal,
) -> Decimal {
    non_negative(tax_before_rebate - rebate)
}
