use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, TaxBracket};

/// The portion of taxable income that fell inside one slab and the tax it drew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTaxLine {
    #[serde(with = "rust_decimal::serde::float")]
    pub min_income: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_income: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub income_in_bracket: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl SlabTaxLine {
    pub fn new(
        bracket: &TaxBracket,
        income_in_bracket: Decimal,
        tax: Decimal,
    ) -> Self {
        Self {
            min_income: bracket.min_income,
            max_income: bracket.max_income,
            tax_rate: bracket.tax_rate,
            income_in_bracket,
            tax,
        }
    }

    /// The slab this line was drawn from.
    pub fn bracket(&self) -> TaxBracket {
        TaxBracket::new(self.min_income, self.max_income, self.tax_rate)
    }
}

/// Itemised result of one tax computation.
///
/// Every amount is non-negative. Only `total_tax` is rounded, to whole
/// rupees; intermediate amounts are exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComputationResult {
    pub regime: Regime,

    // Inputs as applied (negative inputs already clamped)
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_before_rebate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rebate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_after_rebate: Decimal,

    /// Surcharge after marginal relief.
    #[serde(with = "rust_decimal::serde::float")]
    pub surcharge: Decimal,
    /// Amount by which marginal relief reduced the surcharge.
    #[serde(with = "rust_decimal::serde::float")]
    pub marginal_relief: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub cess: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_before_cess: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,

    pub slab_breakdown: Vec<SlabTaxLine>,
}

impl TaxComputationResult {
    /// Total tax as a fraction of gross income, rounded to four places.
    /// Zero when there is no income.
    pub fn effective_rate(&self) -> Decimal {
        if self.gross_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.total_tax / self.gross_income).round_dp(4)
    }
}

/// Both regimes computed for the same inputs, with the cheaper one picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old: TaxComputationResult,
    pub new: TaxComputationResult,
    pub recommended: Regime,
    /// Absolute difference in total tax between the two regimes.
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
}

impl RegimeComparison {
    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &TaxComputationResult {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    pub fn recommended_result(&self) -> &TaxComputationResult {
        self.result_for(self.recommended)
    }
}
