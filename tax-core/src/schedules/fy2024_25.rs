//! Financial Year 2024-25 (Assessment Year 2025-26) rate tables.
//!
//! | New regime          | Rate | Old regime          | Rate |
//! |---------------------|------|---------------------|------|
//! | up to 3,00,000      | nil  | up to 2,50,000      | nil  |
//! | 3,00,001-6,00,000   | 5%   | 2,50,001-5,00,000   | 5%   |
//! | 6,00,001-9,00,000   | 10%  | 5,00,001-10,00,000  | 20%  |
//! | 9,00,001-12,00,000  | 15%  | above 10,00,000     | 30%  |
//! | 12,00,001-15,00,000 | 20%  |                     |      |
//! | above 15,00,000     | 30%  |                     |      |
//!
//! Surcharge is charged on tax after rebate when total income exceeds 50 lakh
//! and the New regime caps it at 25%. Health and education cess is 4% of tax
//! plus surcharge.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Regime, RegimeConfig, SurchargeTier, TaxBracket};

pub const FINANCIAL_YEAR: &str = "2024-25";

/// Health and education cess on (tax + surcharge).
pub const CESS_RATE: Decimal = dec!(0.04);

static NEW_REGIME: LazyLock<RegimeConfig> = LazyLock::new(|| RegimeConfig {
    regime: Regime::New,
    brackets: vec![
        TaxBracket::new(dec!(0), Some(dec!(300000)), dec!(0)),
        TaxBracket::new(dec!(300000), Some(dec!(600000)), dec!(0.05)),
        TaxBracket::new(dec!(600000), Some(dec!(900000)), dec!(0.10)),
        TaxBracket::new(dec!(900000), Some(dec!(1200000)), dec!(0.15)),
        TaxBracket::new(dec!(1200000), Some(dec!(1500000)), dec!(0.20)),
        TaxBracket::new(dec!(1500000), None, dec!(0.30)),
    ],
    basic_exemption: dec!(300000),
    rebate_threshold: dec!(700000),
    rebate_max_amount: dec!(25000),
    standard_deduction: dec!(50000),
});

static OLD_REGIME: LazyLock<RegimeConfig> = LazyLock::new(|| RegimeConfig {
    regime: Regime::Old,
    brackets: vec![
        TaxBracket::new(dec!(0), Some(dec!(250000)), dec!(0)),
        TaxBracket::new(dec!(250000), Some(dec!(500000)), dec!(0.05)),
        TaxBracket::new(dec!(500000), Some(dec!(1000000)), dec!(0.20)),
        TaxBracket::new(dec!(1000000), None, dec!(0.30)),
    ],
    basic_exemption: dec!(250000),
    rebate_threshold: dec!(500000),
    rebate_max_amount: dec!(12500),
    standard_deduction: dec!(50000),
});

static SURCHARGE_TIERS: LazyLock<Vec<SurchargeTier>> = LazyLock::new(|| {
    vec![
        SurchargeTier::new(Some(dec!(5000000)), dec!(0), dec!(0)),
        SurchargeTier::new(Some(dec!(10000000)), dec!(0.10), dec!(0.10)),
        SurchargeTier::new(Some(dec!(20000000)), dec!(0.15), dec!(0.15)),
        SurchargeTier::new(Some(dec!(50000000)), dec!(0.25), dec!(0.25)),
        SurchargeTier::new(None, dec!(0.37), dec!(0.25)),
    ]
});

pub fn new_regime() -> &'static RegimeConfig {
    &NEW_REGIME
}

pub fn old_regime() -> &'static RegimeConfig {
    &OLD_REGIME
}

pub fn regime_config(regime: Regime) -> &'static RegimeConfig {
    match regime {
        Regime::Old => old_regime(),
        Regime::New => new_regime(),
    }
}

pub fn surcharge_tiers() -> &'static [SurchargeTier] {
    &SURCHARGE_TIERS
}
