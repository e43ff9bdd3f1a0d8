use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::Regime;

use crate::settings::{OutputFormat, Overrides};
use crate::utils::parse_amount;

/// Indian income tax estimator for FY 2024-25.
///
/// Amounts accept plain numbers, comma grouping (`12,00,000`) and
/// `K`/`L`/`Cr` suffixes (`12L`, `1.1Cr`).
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version)]
pub struct Cli {
    /// TOML settings file providing defaults for the options below.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level or filter directive (overridden by RUST_LOG).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Itemised tax for one regime.
    Compute {
        /// Gross annual income.
        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        /// Chapter VI-A deductions (Old regime only).
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        deductions: Decimal,

        /// `old` or `new`; defaults to the settings regime.
        #[arg(long)]
        regime: Option<Regime>,
    },

    /// Both regimes side by side, with a recommendation.
    Compare {
        #[arg(long, value_parser = parse_amount)]
        income: Decimal,

        #[arg(long, value_parser = parse_amount, default_value = "0")]
        deductions: Decimal,
    },

    /// Slab table, surcharge tiers and cess rate.
    Slabs {
        /// Show one regime only; both when omitted.
        #[arg(long)]
        regime: Option<Regime>,
    },

    /// Computes every row of a scenario CSV.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Flags that take precedence over the settings file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}
