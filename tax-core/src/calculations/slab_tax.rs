//! Progressive slab tax.
//!
//! Each slab taxes only the slice of income that falls between its bounds,
//! so the tax is the sum of `income_in_slab × slab_rate` over all slabs up to
//! the one containing the taxable income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::SlabTaxCalculator;
//! use tax_core::schedules::new_regime;
//!
//! let calculator = SlabTaxCalculator::new(&new_regime().brackets);
//!
//! // 0 + 15,000 + 30,000 + 37,500
//! assert_eq!(calculator.compute(dec!(1150000)), dec!(82500));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::{max, min, non_negative};
use crate::models::{SlabTaxLine, TaxBracket};

/// Applies a progressive schedule to a taxable income.
#[derive(Debug, Clone, Copy)]
pub struct SlabTaxCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> SlabTaxCalculator<'a> {
    /// Brackets must be ascending and contiguous. A schedule that does not
    /// reach the income silently leaves the excess untaxed; see
    /// [`RegimeConfig::validate`](crate::RegimeConfig::validate).
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Total slab tax on `taxable_income`, never negative.
    pub fn compute(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let tax = self
            .portions(taxable_income)
            .into_iter()
            .fold(Decimal::ZERO, |acc, (bracket, income_in_bracket)| {
                acc + income_in_bracket * bracket.tax_rate
            });

        non_negative(tax)
    }

    /// Slab-by-slab lines for an itemised report.
    ///
    /// Slabs the income does not reach are omitted; the `tax` column sums to
    /// [`compute`](Self::compute).
    pub fn breakdown(
        &self,
        taxable_income: Decimal,
    ) -> Vec<SlabTaxLine> {
        self.portions(taxable_income)
            .into_iter()
            .filter(|(_, income_in_bracket)| *income_in_bracket > Decimal::ZERO)
            .map(|(bracket, income_in_bracket)| {
                SlabTaxLine::new(bracket, income_in_bracket, income_in_bracket * bracket.tax_rate)
            })
            .collect()
    }

    /// Pairs each visited slab with the income that falls inside it.
    fn portions(
        &self,
        taxable_income: Decimal,
    ) -> Vec<(&'a TaxBracket, Decimal)> {
        let mut portions = Vec::with_capacity(self.brackets.len());
        if taxable_income <= Decimal::ZERO {
            return portions;
        }

        let mut processed_upper = Decimal::ZERO;
        for bracket in self.brackets {
            let upper = bracket.upper_or_max();
            let floor = max(processed_upper, bracket.min_income);
            let income_in_bracket = non_negative(min(taxable_income, upper) - floor);

            trace!(
                min_income = %bracket.min_income,
                rate = %bracket.tax_rate,
                %income_in_bracket,
                "slab portion"
            );
            portions.push((bracket, income_in_bracket));

            processed_upper = upper;
            if taxable_income <= upper {
                break;
            }
        }

        portions
    }
}

/// Slab tax on `taxable_income` under `brackets`.
pub fn compute_slab_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    SlabTaxCalculator::new(brackets).compute(taxable_income)
}

/// Per-slab lines for `taxable_income`; their `tax` column sums to
/// [`compute_slab_tax`].
pub fn slab_breakdown(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Vec<SlabTaxLine> {
    SlabTaxCalculator::new(brackets).breakdown(taxable_income)
}
