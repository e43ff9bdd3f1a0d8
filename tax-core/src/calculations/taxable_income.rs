//! Gross income to taxable income.
//!
//! Both regimes allow the standard deduction. Only the Old regime honours
//! other claimed deductions (80C, 80D, HRA and the like); the New regime
//! ignores them.

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::models::{Regime, RegimeConfig};

/// Gross income less the standard deduction, floored at zero.
pub fn income_after_standard_deduction(
    gross_income: Decimal,
    config: &RegimeConfig,
) -> Decimal {
    if gross_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    non_negative(gross_income - config.standard_deduction)
}

/// Taxable income for `config.regime`, never negative.
///
/// Negative deductions are treated as zero.
pub fn derive_taxable_income(
    gross_income: Decimal,
    total_deductions: Decimal,
    config: &RegimeConfig,
) -> Decimal {
    let after_standard = income_after_standard_deduction(gross_income, config);

    match config.regime {
        Regime::Old => non_negative(after_standard - non_negative(total_deductions)),
        Regime::New => after_standard,
    }
}
