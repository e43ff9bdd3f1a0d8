//! Surcharge with marginal relief.
//!
//! Surcharge is a percentage of tax after rebate, the percentage stepping up
//! with total income. A step is a cliff: one rupee over 50 lakh would
//! otherwise add 10% of the whole tax bill. Marginal relief trims the
//! surcharge so that income above a threshold never costs more in tax and
//! surcharge than the income itself.
//!
//! # Algorithm
//!
//! 1. **Rate.** The first tier whose upper bound is at or above the income
//!    sets the rate (the terminal tier if none). The New regime caps it at
//!    the tier's `new_regime_cap`.
//! 2. **Relief.** Take the nearest finite, non-zero threshold `T` below the
//!    income. Compute what tax and surcharge would have been at exactly `T`
//!    (slab tax plus the lower tier's surcharge, no relief). If tax and
//!    surcharge at the actual income exceed that figure by more than
//!    `income - T`, the excess comes off the surcharge.
//!
//! Tax at the threshold is evaluated with the slab calculator directly; this
//! module never calls back into itself.
//!
//! # Limitations
//!
//! The Old regime's 15% cap on surcharge attributable to dividends and
//! capital gains is not applied; the engine does not split tax by income
//! type.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{min, non_negative};
use crate::calculations::rebate::{apply_rebate, compute_rebate};
use crate::calculations::slab_tax::SlabTaxCalculator;
use crate::models::{Regime, RegimeConfig, SurchargeTier};

/// How the surcharge for one computation was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurchargeOutcome {
    /// Rate applied, after the New-regime cap.
    pub rate: Decimal,

    /// Surcharge before marginal relief.
    pub raw_surcharge: Decimal,

    /// Reduction granted by marginal relief.
    pub marginal_relief: Decimal,

    /// Surcharge payable.
    pub surcharge: Decimal,

    /// Threshold relief was measured against, if any.
    pub relief_threshold: Option<Decimal>,
}

/// Computes surcharge for one regime against a tier table.
#[derive(Debug, Clone, Copy)]
pub struct SurchargeCalculator<'a> {
    config: &'a RegimeConfig,
    tiers: &'a [SurchargeTier],
}

impl<'a> SurchargeCalculator<'a> {
    pub fn new(
        config: &'a RegimeConfig,
        tiers: &'a [SurchargeTier],
    ) -> Self {
        Self { config, tiers }
    }

    /// Surcharge on `tax_after_rebate`.
    ///
    /// `income_for_rate` selects the tier; `taxable_income` is the income the
    /// slab tax was computed on, needed to re-evaluate tax at a threshold.
    pub fn compute(
        &self,
        income_for_rate: Decimal,
        taxable_income: Decimal,
        tax_after_rebate: Decimal,
    ) -> SurchargeOutcome {
        if tax_after_rebate <= Decimal::ZERO {
            return SurchargeOutcome::default();
        }

        let rate = self.rate_for(income_for_rate);
        let raw_surcharge = non_negative(tax_after_rebate * rate);
        debug!(%income_for_rate, %rate, %raw_surcharge, "surcharge rate selected");

        let mut outcome = SurchargeOutcome {
            rate,
            raw_surcharge,
            marginal_relief: Decimal::ZERO,
            surcharge: raw_surcharge,
            relief_threshold: None,
        };
        if raw_surcharge.is_zero() {
            return outcome;
        }

        let Some(threshold) = self.relief_threshold(income_for_rate) else {
            return outcome;
        };
        outcome.relief_threshold = Some(threshold);

        let tax_at_threshold = self.tax_at_threshold(threshold, income_for_rate, taxable_income);
        let tax_increase = tax_after_rebate + raw_surcharge - tax_at_threshold;
        let income_increase = income_for_rate - threshold;

        if tax_increase > income_increase {
            let relief = tax_increase - income_increase;
            outcome.surcharge = non_negative(raw_surcharge - relief);
            outcome.marginal_relief = raw_surcharge - outcome.surcharge;
            debug!(
                %threshold,
                %tax_at_threshold,
                relief = %outcome.marginal_relief,
                "marginal relief applied"
            );
        }

        outcome
    }

    /// Surcharge rate for an income, with the New-regime cap applied.
    pub fn rate_for(
        &self,
        income_for_rate: Decimal,
    ) -> Decimal {
        let Some(tier) = self
            .tiers
            .iter()
            .find(|tier| tier.covers(income_for_rate))
            .or_else(|| self.tiers.last())
        else {
            return Decimal::ZERO;
        };

        match self.config.regime {
            Regime::New => min(tier.rate, tier.new_regime_cap),
            Regime::Old => tier.rate,
        }
    }

    /// The finite, non-zero threshold whose relief window holds the income.
    ///
    /// A threshold's window runs from just above it up to the next threshold,
    /// so this is the highest threshold strictly below the income.
    fn relief_threshold(
        &self,
        income_for_rate: Decimal,
    ) -> Option<Decimal> {
        let thresholds = self
            .tiers
            .iter()
            .filter_map(|tier| tier.income_upper_bound)
            .filter(|bound| *bound > Decimal::ZERO);
        let window_ends = thresholds.clone().skip(1).map(Some).chain(std::iter::once(None));

        thresholds.zip(window_ends).find_map(|(threshold, window_end)| {
            let in_window = income_for_rate > threshold
                && window_end.is_none_or(|end| income_for_rate <= end);
            in_window.then_some(threshold)
        })
    }

    /// Tax plus surcharge the taxpayer would owe with income exactly at
    /// `threshold`, deductions unchanged.
    fn tax_at_threshold(
        &self,
        threshold: Decimal,
        income_for_rate: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        let taxable_at_threshold = non_negative(taxable_income - (income_for_rate - threshold));
        let slab_tax = SlabTaxCalculator::new(&self.config.brackets).compute(taxable_at_threshold);
        let rebate = compute_rebate(taxable_at_threshold, slab_tax, self.config);
        let tax = apply_rebate(slab_tax, rebate);

        tax + tax * self.rate_for(threshold)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::schedules::{new_regime, old_regime, surcharge_tiers};

    fn old_calculator() -> SurchargeCalculator<'static> {
        SurchargeCalculator::new(old_regime(), surcharge_tiers())
    }

    fn new_calculator() -> SurchargeCalculator<'static> {
        SurchargeCalculator::new(new_regime(), surcharge_tiers())
    }

    // =========================================================================
    // rate_for tests
    // =========================================================================

    #[test]
    fn rate_is_zero_up_to_fifty_lakh() {
        assert_eq!(old_calculator().rate_for(dec!(5000000)), dec!(0));
    }

    #[test]
    fn rate_steps_at_each_threshold() {
        let calculator = old_calculator();

        assert_eq!(calculator.rate_for(dec!(5000001)), dec!(0.10));
        assert_eq!(calculator.rate_for(dec!(10000000)), dec!(0.10));
        assert_eq!(calculator.rate_for(dec!(10000001)), dec!(0.15));
        assert_eq!(calculator.rate_for(dec!(20000001)), dec!(0.25));
        assert_eq!(calculator.rate_for(dec!(50000001)), dec!(0.37));
    }

    #[test]
    fn new_regime_rate_is_capped_at_twenty_five_percent() {
        assert_eq!(new_calculator().rate_for(dec!(60000000)), dec!(0.25));
    }

    #[test]
    fn rate_falls_back_to_last_tier_when_nothing_covers_income() {
        let tiers = vec![
            SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0)),
            SurchargeTier::new(Some(dec!(10000000)), dec!(0.10), dec!(0.10)),
        ];
        let calculator = SurchargeCalculator::new(old_regime(), &tiers);

        assert_eq!(calculator.rate_for(dec!(90000000)), dec!(0.10));
    }

    #[test]
    fn rate_is_zero_without_tiers() {
        let calculator = SurchargeCalculator::new(old_regime(), &[]);

        assert_eq!(calculator.rate_for(dec!(90000000)), dec!(0));
    }

    // =========================================================================
    // relief_threshold tests
    // =========================================================================

    #[test]
    fn relief_threshold_is_highest_threshold_below_income() {
        let calculator = old_calculator();

        assert_eq!(calculator.relief_threshold(dec!(5000000)), None);
        assert_eq!(calculator.relief_threshold(dec!(5000001)), Some(dec!(5000000)));
        assert_eq!(calculator.relief_threshold(dec!(10000000)), Some(dec!(5000000)));
        assert_eq!(calculator.relief_threshold(dec!(10000001)), Some(dec!(10000000)));
        assert_eq!(calculator.relief_threshold(dec!(20100000)), Some(dec!(20000000)));
        assert_eq!(calculator.relief_threshold(dec!(50100000)), Some(dec!(50000000)));
        assert_eq!(calculator.relief_threshold(dec!(900000000)), Some(dec!(50000000)));
    }

    #[test]
    fn relief_threshold_skips_zero_bounds_and_empty_tables() {
        let tiers = vec![
            SurchargeTier::new(Some(dec!(0)), dec!(0), dec!(0)),
            SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0)),
            SurchargeTier::new(None, dec!(0.10), dec!(0.10)),
        ];

        let calculator = SurchargeCalculator::new(old_regime(), &tiers);
        assert_eq!(calculator.relief_threshold(dec!(100)), None);
        assert_eq!(calculator.relief_threshold(dec!(6000000)), Some(dec!(5000000)));

        assert_eq!(SurchargeCalculator::new(old_regime(), &[]).relief_threshold(dec!(6000000)), None);
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn no_surcharge_without_tax() {
        let outcome = old_calculator().compute(dec!(60000000), dec!(0), dec!(0));

        assert_eq!(outcome, SurchargeOutcome::default());
    }

    #[test]
    fn no_surcharge_below_fifty_lakh() {
        let outcome = old_calculator().compute(dec!(4000000), dec!(3950000), dec!(997500));

        assert_eq!(outcome.rate, dec!(0));
        assert_eq!(outcome.surcharge, dec!(0));
        assert_eq!(outcome.relief_threshold, None);
    }

    #[test]
    fn relief_just_above_fifty_lakh_new_regime() {
        // Gross 50.6L: base and taxable 50.1L, slab tax 12,03,000
        let outcome = new_calculator().compute(dec!(5010000), dec!(5010000), dec!(1203000));

        // Tax at 50L is 12,00,000; tax + surcharge may rise by at most 10,000
        assert_eq!(outcome.rate, dec!(0.10));
        assert_eq!(outcome.raw_surcharge, dec!(120300));
        assert_eq!(outcome.relief_threshold, Some(dec!(5000000)));
        assert_eq!(outcome.marginal_relief, dec!(113300));
        assert_eq!(outcome.surcharge, dec!(7000));
    }

    #[test]
    fn relief_just_above_one_crore_old_regime() {
        // Gross 1.01Cr, taxable 1,00,50,000, slab tax 28,27,500
        let outcome = old_calculator().compute(dec!(10100000), dec!(10050000), dec!(2827500));

        // Tax + 10% surcharge at 1Cr is 30,77,250
        assert_eq!(outcome.rate, dec!(0.15));
        assert_eq!(outcome.raw_surcharge, dec!(424125));
        assert_eq!(outcome.relief_threshold, Some(dec!(10000000)));
        assert_eq!(outcome.marginal_relief, dec!(74375));
        assert_eq!(outcome.surcharge, dec!(349750));
    }

    #[test]
    fn relief_stops_once_surcharge_step_is_absorbed() {
        // Gross 1.1Cr, taxable 1,09,50,000, slab tax 30,97,500
        let outcome = old_calculator().compute(dec!(11000000), dec!(10950000), dec!(3097500));

        assert_eq!(outcome.rate, dec!(0.15));
        assert_eq!(outcome.marginal_relief, dec!(0));
        assert_eq!(outcome.surcharge, dec!(464625));
    }

    #[test]
    fn no_relief_deep_inside_a_tier() {
        // Gross 1Cr sits at the top of the 10% tier, far from 50L
        let outcome = old_calculator().compute(dec!(10000000), dec!(9950000), dec!(2797500));

        assert_eq!(outcome.relief_threshold, Some(dec!(5000000)));
        assert_eq!(outcome.marginal_relief, dec!(0));
        assert_eq!(outcome.surcharge, dec!(279750));
    }

    #[test]
    fn new_regime_has_no_relief_when_cap_flattens_the_step() {
        // Base 5.01Cr: 25% on both sides of the 5Cr threshold
        let slab = SlabTaxCalculator::new(&new_regime().brackets).compute(dec!(50100000));
        let outcome = new_calculator().compute(dec!(50100000), dec!(50100000), slab);

        assert_eq!(outcome.rate, dec!(0.25));
        assert_eq!(outcome.marginal_relief, dec!(0));
    }

    #[test]
    fn relief_never_lets_tax_rise_faster_than_income() {
        let calculator = old_calculator();
        let slab = SlabTaxCalculator::new(&old_regime().brackets);

        for threshold in [dec!(5000000), dec!(10000000), dec!(20000000), dec!(50000000)] {
            let base_taxable = threshold - dec!(50000);
            let at_threshold_tax = slab.compute(base_taxable);
            let at_threshold = at_threshold_tax
                + calculator
                    .compute(threshold, base_taxable, at_threshold_tax)
                    .surcharge;

            for step in [dec!(1), dec!(100), dec!(10000), dec!(1000000), dec!(5000000)] {
                let income = threshold + step;
                let tax = slab.compute(base_taxable + step);
                let total = tax + calculator.compute(income, base_taxable + step, tax).surcharge;

                assert!(
                    total - at_threshold <= step + dec!(0.01),
                    "threshold {threshold} step {step}: rose by {}",
                    total - at_threshold
                );
            }
        }
    }
}
