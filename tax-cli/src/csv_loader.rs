//! CSV loader for batch scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column         | Required | Notes                                          |
//! |----------------|----------|------------------------------------------------|
//! | `label`        | yes      | Free text shown next to the result             |
//! | `gross_income` | yes      | Amount, e.g. `1200000`, `12L`, `1.1Cr`         |
//! | `deductions`   | no       | Chapter VI-A deductions; empty means 0         |
//! | `regime`       | no       | `old` or `new`; empty uses the settings regime |
//!
//! Amounts accept the same forms as the command line. Quote values that
//! contain commas (`"12,00,000"`).
//!
//! ```csv
//! label,gross_income,deductions,regime
//! salaried,12L,,new
//! investor,"1,10,00,000",150000,old
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::Regime;

use crate::utils::{ParseAmountError, parse_amount, parse_optional_amount};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    gross_income: String,
    #[serde(default)]
    deductions: Option<String>,
    #[serde(default)]
    regime: Option<String>,
}

/// One batch row, with amounts parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub gross_income: Decimal,
    pub deductions: Decimal,
    /// `None` when the row leaves the regime blank.
    pub regime: Option<Regime>,
}

impl Scenario {
    pub fn regime_or(
        &self,
        default: Regime,
    ) -> Regime {
        self.regime.unwrap_or(default)
    }
}

/// Errors that can occur while loading batch scenarios.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing required column, wrong column count.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An amount cell could not be parsed. `row` is 1-based (header = row 0).
    #[error("row {row}, column '{column}': {source}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        #[source]
        source: ParseAmountError,
    },

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    let invalid_amount = |column: &'static str, source: ParseAmountError| CsvLoadError::InvalidAmount {
        row: row_number,
        column,
        source,
    };

    let gross_income =
        parse_amount(&row.gross_income).map_err(|e| invalid_amount("gross_income", e))?;
    let deductions = parse_optional_amount(row.deductions.as_deref().unwrap_or_default())
        .map_err(|e| invalid_amount("deductions", e))?
        .unwrap_or_default();

    let regime = match row.regime.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(Regime::parse(value).ok_or_else(|| CsvLoadError::InvalidRegime {
            value: value.to_string(),
            row: row_number,
        })?),
    };

    Ok(Scenario {
        label: row.label,
        gross_income,
        deductions,
        regime,
    })
}

/// Parses CSV text into scenarios, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] when the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidAmount`] or [`CsvLoadError::InvalidRegime`] for
///   the first bad cell, with its row number.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    tracing::debug!(path = %path.display(), rows = scenarios.len(), "scenarios loaded");
    Ok(scenarios)
}
