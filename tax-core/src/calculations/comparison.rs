//! Old-versus-New regime comparison.

use rust_decimal::Decimal;
use tracing::info;

use crate::calculations::tax_payable::calculate_tax_payable;
use crate::models::{Regime, RegimeComparison};

/// Computes both regimes for the same inputs and recommends the cheaper one.
///
/// Ties go to the New regime, which is the default for FY 2024-25.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{Regime, compare_regimes};
///
/// let comparison = compare_regimes(dec!(1200000), dec!(0));
///
/// assert_eq!(comparison.recommended, Regime::New);
/// assert_eq!(comparison.new.total_tax, dec!(85800));
/// ```
pub fn compare_regimes(
    gross_income: Decimal,
    total_deductions: Decimal,
) -> RegimeComparison {
    let old = calculate_tax_payable(gross_income, total_deductions, Regime::Old);
    let new = calculate_tax_payable(gross_income, total_deductions, Regime::New);

    let recommended = if old.total_tax < new.total_tax {
        Regime::Old
    } else {
        Regime::New
    };
    let savings = (old.total_tax - new.total_tax).abs();

    info!(
        %gross_income,
        %total_deductions,
        old_total = %old.total_tax,
        new_total = %new.total_tax,
        %recommended,
        "regimes compared"
    );

    RegimeComparison {
        old,
        new,
        recommended,
        savings,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_regime_wins_without_deductions() {
        let comparison = compare_regimes(dec!(1200000), dec!(0));

        // Old: 1150000 taxable -> 12500 + 100000 + 45000 = 157500 + 4% = 163800
        assert_eq!(comparison.old.total_tax, dec!(163800));
        assert_eq!(comparison.new.total_tax, dec!(85800));
        assert_eq!(comparison.recommended, Regime::New);
        assert_eq!(comparison.savings, dec!(78000));
    }

    #[test]
    fn old_regime_wins_with_large_deductions() {
        // Old: 12L - 50k - 6.5L = 5L taxable, fully rebated
        let comparison = compare_regimes(dec!(1200000), dec!(650000));

        assert_eq!(comparison.old.total_tax, dec!(0));
        assert_eq!(comparison.recommended, Regime::Old);
        assert_eq!(comparison.savings, dec!(85800));
        assert_eq!(comparison.recommended_result().regime, Regime::Old);
    }

    #[test]
    fn tie_recommends_new_regime() {
        let comparison = compare_regimes(dec!(0), dec!(0));

        assert_eq!(comparison.savings, dec!(0));
        assert_eq!(comparison.recommended, Regime::New);
    }

    #[test]
    fn result_for_returns_matching_regime() {
        let comparison = compare_regimes(dec!(900000), dec!(100000));

        assert_eq!(comparison.result_for(Regime::Old).regime, Regime::Old);
        assert_eq!(comparison.result_for(Regime::New).regime, Regime::New);
    }
}
