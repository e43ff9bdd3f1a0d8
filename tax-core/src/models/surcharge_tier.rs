use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScheduleError;

/// One row of the surcharge table.
///
/// A tier applies to incomes up to and including `income_upper_bound`
/// that were not claimed by an earlier tier. `None` marks the terminal tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub income_upper_bound: Option<Decimal>,
    pub rate: Decimal,
    /// Highest rate the New regime may charge within this tier.
    pub new_regime_cap: Decimal,
}

impl SurchargeTier {
    pub const fn new(
        income_upper_bound: Option<Decimal>,
        rate: Decimal,
        new_regime_cap: Decimal,
    ) -> Self {
        Self {
            income_upper_bound,
            rate,
            new_regime_cap,
        }
    }

    pub fn covers(
        &self,
        income: Decimal,
    ) -> bool {
        self.income_upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// Checks that tiers ascend strictly, end open-ended and carry sane rates.
///
/// # Errors
///
/// Returns the first [`ScheduleError`] found, scanning tiers in order.
pub fn validate_surcharge_tiers(tiers: &[SurchargeTier]) -> Result<(), ScheduleError> {
    if tiers.is_empty() {
        return Err(ScheduleError::NoSurchargeTiers);
    }

    let mut previous_bound: Option<Decimal> = None;
    for (index, tier) in tiers.iter().enumerate() {
        for rate in [tier.rate, tier.new_regime_cap] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ScheduleError::InvalidSurchargeRate { index, rate });
            }
        }

        match tier.income_upper_bound {
            Some(bound) => {
                if previous_bound.is_some_and(|prev| bound <= prev) {
                    return Err(ScheduleError::SurchargeTiersNotAscending(index));
                }
                previous_bound = Some(bound);
            }
            None if index != tiers.len() - 1 => {
                return Err(ScheduleError::SurchargeTiersNotAscending(index + 1));
            }
            None => {}
        }
    }

    if tiers[tiers.len() - 1].income_upper_bound.is_some() {
        return Err(ScheduleError::MissingTerminalTier);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn covers_is_inclusive_of_upper_bound() {
        let tier = SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0));

        assert!(tier.covers(dec!(5000000)));
        assert!(!tier.covers(dec!(5000001)));
    }

    #[test]
    fn terminal_tier_covers_any_income() {
        let tier = SurchargeTier::new(None, dec!(0.37), dec!(0.25));

        assert!(tier.covers(dec!(99999999999)));
    }

    #[test]
    fn validate_accepts_ascending_tiers() {
        let tiers = vec![
            SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0)),
            SurchargeTier::new(None, dec!(0.10), dec!(0.10)),
        ];

        assert_eq!(validate_surcharge_tiers(&tiers), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(
            validate_surcharge_tiers(&[]),
            Err(ScheduleError::NoSurchargeTiers)
        );
    }

    #[test]
    fn validate_rejects_descending_bounds() {
        let tiers = vec![
            SurchargeTier::new(Some(dec!(10000000)), dec!(0), dec!(0)),
            SurchargeTier::new(Some(dec!(5000000)), dec!(0.10), dec!(0.10)),
            SurchargeTier::new(None, dec!(0.15), dec!(0.15)),
        ];

        assert_eq!(
            validate_surcharge_tiers(&tiers),
            Err(ScheduleError::SurchargeTiersNotAscending(1))
        );
    }

    #[test]
    fn validate_rejects_missing_terminal_tier() {
        let tiers = vec![SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0))];

        assert_eq!(
            validate_surcharge_tiers(&tiers),
            Err(ScheduleError::MissingTerminalTier)
        );
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let tiers = vec![SurchargeTier::new(None, dec!(0.10), dec!(-0.01))];

        assert_eq!(
            validate_surcharge_tiers(&tiers),
            Err(ScheduleError::InvalidSurchargeRate {
                index: 0,
                rate: dec!(-0.01),
            })
        );
    }
}
