use rust_decimal::Decimal;
use thiserror::Error;

/// Structural problems in a slab schedule or surcharge tier table.
///
/// The engine itself never returns these; a schedule that fails validation
/// still computes, it just undercounts. Validation is an explicit check for
/// whoever builds a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule has no slabs at all.
    #[error("schedule has no tax brackets")]
    NoBrackets,

    /// The first slab must start at zero income.
    #[error("first tax bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    /// A slab does not start where the previous one ended.
    #[error("tax bracket {index} starts at {found}, expected {expected}")]
    GapBetweenBrackets {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A slab's upper bound is not above its lower bound.
    #[error("tax bracket {index} has upper bound {max} not above lower bound {min}")]
    EmptyBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Only the last slab may be open-ended.
    #[error("open-ended tax bracket at position {0} is not the last one")]
    UnboundedBracketNotLast(usize),

    /// The last slab must be open-ended so every income is covered.
    #[error("schedule does not end with an open-ended tax bracket")]
    MissingUnboundedBracket,

    /// Rates are fractions and must lie in [0, 1].
    #[error("tax bracket {index} has rate {rate} outside [0, 1]")]
    InvalidRate { index: usize, rate: Decimal },

    /// The surcharge table has no tiers.
    #[error("surcharge table has no tiers")]
    NoSurchargeTiers,

    /// Tier upper bounds must strictly increase.
    #[error("surcharge tier {0} does not have a higher bound than the tier before it")]
    SurchargeTiersNotAscending(usize),

    /// The last tier must be open-ended.
    #[error("surcharge table does not end with an open-ended tier")]
    MissingTerminalTier,

    /// Surcharge rates and caps are fractions and must lie in [0, 1].
    #[error("surcharge tier {index} has rate {rate} outside [0, 1]")]
    InvalidSurchargeRate { index: usize, rate: Decimal },
}
