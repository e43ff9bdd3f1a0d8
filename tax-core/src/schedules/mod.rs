//! Statutory rate tables.
//!
//! Only Financial Year 2024-25 is modelled. Tables are built once on first
//! access and are read-only afterwards.

pub mod fy2024_25;

pub use fy2024_25::{
    CESS_RATE, FINANCIAL_YEAR, new_regime, old_regime, regime_config, surcharge_tiers,
};
