use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slab of a progressive rate schedule.
///
/// Bounds are half-open: the slab taxes income in `(min_income, max_income]`,
/// and `min_income` of every slab equals `max_income` of the one before it.
/// The first slab starts at zero. `max_income == None` marks the open-ended
/// top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }

    /// Upper bound with the open-ended slab mapped to [`Decimal::MAX`].
    pub fn upper_or_max(&self) -> Decimal {
        self.max_income.unwrap_or(Decimal::MAX)
    }

    /// Lower bound as printed in the published slab tables
    /// (`3,00,001 - 6,00,000`), i.e. the first rupee taxed at this rate.
    pub fn inclusive_min_income(&self) -> Decimal {
        if self.min_income.is_zero() {
            Decimal::ZERO
        } else {
            self.min_income + Decimal::ONE
        }
    }

    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        let above_lower = if self.min_income.is_zero() {
            income >= Decimal::ZERO
        } else {
            income > self.min_income
        };
        above_lower && income <= self.upper_or_max()
    }
}
