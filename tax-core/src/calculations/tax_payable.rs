//! Tax payable for one regime, from gross income to the final rupee figure.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income (gross - standard deduction - Old-regime deductions) |
//! | 2    | Slab tax on taxable income |
//! | 3    | Section 87A rebate; tax after rebate |
//! | 4    | Surcharge base (New: income after standard deduction, Old: gross) |
//! | 5    | Surcharge with marginal relief |
//! | 6    | Tax before cess (step 3 + step 5) |
//! | 7    | Health and education cess (step 6 × 4%) |
//! | 8    | Total tax (step 6 + step 7, rounded to the rupee) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{Regime, calculate_tax_payable};
//!
//! let result = calculate_tax_payable(dec!(1200000), dec!(0), Regime::New);
//!
//! assert_eq!(result.taxable_income, dec!(1150000));
//! assert_eq!(result.tax_before_rebate, dec!(82500));
//! assert_eq!(result.cess, dec!(3300));
//! assert_eq!(result.total_tax, dec!(85800));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_to_rupee};
use crate::calculations::rebate::{apply_rebate, compute_rebate};
use crate::calculations::slab_tax::SlabTaxCalculator;
use crate::calculations::surcharge::SurchargeCalculator;
use crate::calculations::taxable_income::{derive_taxable_income, income_after_standard_deduction};
use crate::models::{Regime, RegimeConfig, SurchargeTier, TaxComputationResult};
use crate::schedules::fy2024_25::{CESS_RATE, regime_config, surcharge_tiers};

/// Runs the full pipeline against an explicit schedule.
///
/// [`calculate_tax_payable`] is this calculator bound to the FY 2024-25
/// tables.
#[derive(Debug, Clone, Copy)]
pub struct TaxPayableCalculator<'a> {
    config: &'a RegimeConfig,
    tiers: &'a [SurchargeTier],
    cess_rate: Decimal,
}

impl<'a> TaxPayableCalculator<'a> {
    pub fn new(
        config: &'a RegimeConfig,
        tiers: &'a [SurchargeTier],
        cess_rate: Decimal,
    ) -> Self {
        Self {
            config,
            tiers,
            cess_rate,
        }
    }

    /// Calculator for a regime under the FY 2024-25 tables.
    pub fn fy2024_25(regime: Regime) -> TaxPayableCalculator<'static> {
        TaxPayableCalculator::new(regime_config(regime), surcharge_tiers(), CESS_RATE)
    }

    pub fn regime(&self) -> Regime {
        self.config.regime
    }

    /// Computes the itemised tax for `gross_income`.
    ///
    /// `total_deductions` only matters under the Old regime. Negative inputs
    /// are clamped to zero.
    pub fn calculate(
        &self,
        gross_income: Decimal,
        total_deductions: Decimal,
    ) -> TaxComputationResult {
        let gross_income = non_negative(gross_income);
        let total_deductions = non_negative(total_deductions);
        let slabs = SlabTaxCalculator::new(&self.config.brackets);

        let taxable_income = derive_taxable_income(gross_income, total_deductions, self.config);
        let tax_before_rebate = slabs.compute(taxable_income);
        let rebate = compute_rebate(taxable_income, tax_before_rebate, self.config);
        let tax_after_rebate = apply_rebate(tax_before_rebate, rebate);

        let income_for_rate = self.surcharge_base(gross_income);
        let surcharge = SurchargeCalculator::new(self.config, self.tiers).compute(
            income_for_rate,
            taxable_income,
            tax_after_rebate,
        );

        let tax_before_cess = tax_after_rebate + surcharge.surcharge;
        let cess = tax_before_cess * self.cess_rate;
        let total_tax = round_to_rupee(tax_before_cess + cess);

        debug!(
            regime = %self.config.regime,
            %gross_income,
            %taxable_income,
            %tax_before_rebate,
            %rebate,
            surcharge = %surcharge.surcharge,
            %cess,
            %total_tax,
            "tax computed"
        );

        TaxComputationResult {
            regime: self.config.regime,
            gross_income,
            total_deductions,
            taxable_income,
            tax_before_rebate,
            rebate,
            tax_after_rebate,
            surcharge: surcharge.surcharge,
            marginal_relief: surcharge.marginal_relief,
            cess,
            tax_before_cess,
            total_tax,
            slab_breakdown: slabs.breakdown(taxable_income),
        }
    }

    /// Income that selects the surcharge tier.
    ///
    /// The Old regime uses gross income and does not net off Chapter VI-A
    /// deductions; the New regime uses income after standard deduction.
    pub fn surcharge_base(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        match self.config.regime {
            Regime::New => income_after_standard_deduction(gross_income, self.config),
            Regime::Old => non_negative(gross_income),
        }
    }
}

/// Tax payable under `regime` using the FY 2024-25 tables.
pub fn calculate_tax_payable(
    gross_income: Decimal,
    total_deductions: Decimal,
    regime: Regime,
) -> TaxComputationResult {
    TaxPayableCalculator::fy2024_25(regime).calculate(gross_income, total_deductions)
}

/// [`calculate_tax_payable`] with no claimed deductions.
pub fn calculate_tax_payable_default(
    gross_income: Decimal,
    regime: Regime,
) -> TaxComputationResult {
    calculate_tax_payable(gross_income, Decimal::ZERO, regime)
}
