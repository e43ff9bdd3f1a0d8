//! Indian personal income tax engine for Financial Year 2024-25.
//!
//! Computes tax payable under the Old and New regimes: slab tax, Section 87A
//! rebate, surcharge with marginal relief, and health and education cess.
//! Everything here is a pure, synchronous function of its inputs and the
//! static rate tables in [`schedules`].

pub mod calculations;
pub mod models;
pub mod schedules;

pub use calculations::{
    TaxPayableCalculator, calculate_tax_payable, calculate_tax_payable_default, compare_regimes,
};
pub use models::*;
pub use schedules::{CESS_RATE, new_regime, old_regime, regime_config, surcharge_tiers};
