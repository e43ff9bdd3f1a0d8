//! The tax computation engine.
//!
//! Each stage lives in its own module and is a pure function of its inputs;
//! [`tax_payable`] composes them into the full pipeline.

pub mod common;
pub mod comparison;
pub mod rebate;
pub mod slab_tax;
pub mod surcharge;
pub mod tax_payable;
pub mod taxable_income;

pub use comparison::compare_regimes;
pub use rebate::{apply_rebate, compute_rebate};
pub use slab_tax::{SlabTaxCalculator, compute_slab_tax, slab_breakdown};
pub use surcharge::{SurchargeCalculator, SurchargeOutcome};
pub use tax_payable::{TaxPayableCalculator, calculate_tax_payable, calculate_tax_payable_default};
pub use taxable_income::{derive_taxable_income, income_after_standard_deduction};
