use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, ScheduleError, TaxBracket};

/// Everything the engine needs to know about one regime for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub regime: Regime,

    /// Slabs in ascending order, covering `[0, ∞)`.
    pub brackets: Vec<TaxBracket>,

    /// Income taxed at nil rate. Informational; the first slab already
    /// encodes it.
    pub basic_exemption: Decimal,

    /// Section 87A applies when taxable income is at or below this amount.
    pub rebate_threshold: Decimal,

    /// Largest rebate Section 87A can grant.
    pub rebate_max_amount: Decimal,

    /// Flat deduction from gross salary income.
    pub standard_deduction: Decimal,
}

impl RegimeConfig {
    /// Checks that the slabs form a contiguous, ascending cover of `[0, ∞)`
    /// with every rate in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found, scanning slabs in order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{Regime, RegimeConfig, ScheduleError, TaxBracket};
    ///
    /// let config = RegimeConfig {
    ///     regime: Regime::New,
    ///     brackets: vec![TaxBracket::new(dec!(0), Some(dec!(300000)), dec!(0))],
    ///     basic_exemption: dec!(300000),
    ///     rebate_threshold: dec!(700000),
    ///     rebate_max_amount: dec!(25000),
    ///     standard_deduction: dec!(50000),
    /// };
    ///
    /// assert_eq!(config.validate(), Err(ScheduleError::MissingUnboundedBracket));
    /// ```
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let first = self.brackets.first().ok_or(ScheduleError::NoBrackets)?;
        if !first.min_income.is_zero() {
            return Err(ScheduleError::FirstBracketNotZero(first.min_income));
        }

        let last_index = self.brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.min_income != expected_min {
                return Err(ScheduleError::GapBetweenBrackets {
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(ScheduleError::EmptyBracket {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) => expected_min = max,
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBracketNotLast(index));
                }
                None => {}
            }
        }

        if !self.brackets[last_index].is_unbounded() {
            return Err(ScheduleError::MissingUnboundedBracket);
        }

        Ok(())
    }
}
