mod regime;
mod regime_config;
mod schedule_error;
mod surcharge_tier;
mod tax_bracket;
mod tax_computation;

pub use regime::{Regime, UnknownRegime};
pub use regime_config::RegimeConfig;
pub use schedule_error::ScheduleError;
pub use surcharge_tier::{SurchargeTier, validate_surcharge_tiers};
pub use tax_bracket::TaxBracket;
pub use tax_computation::{RegimeComparison, SlabTaxLine, TaxComputationResult};
