//! Command dispatch. Everything here writes to a caller-supplied writer so
//! the binary and the tests share one code path.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tax_core::schedules::FINANCIAL_YEAR;
use tax_core::{
    CESS_RATE, Regime, RegimeConfig, SurchargeTier, calculate_tax_payable, compare_regimes,
    regime_config, surcharge_tiers,
};
use tracing::{debug, info};

use crate::cli::Command;
use crate::csv_loader;
use crate::report::{self, LabelledResult};
use crate::settings::{OutputFormat, Settings};

/// JSON shape of the `slabs` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleView<'a> {
    financial_year: &'static str,
    #[serde(flatten)]
    config: &'a RegimeConfig,
    surcharge_tiers: &'a [SurchargeTier],
    #[serde(with = "rust_decimal::serde::float")]
    cess_rate: rust_decimal::Decimal,
}

fn schedule_view(regime: Regime) -> ScheduleView<'static> {
    ScheduleView {
        financial_year: FINANCIAL_YEAR,
        config: regime_config(regime),
        surcharge_tiers: surcharge_tiers(),
        cess_rate: CESS_RATE,
    }
}

fn emit<T: Serialize + ?Sized>(
    out: &mut impl Write,
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> Result<String, std::fmt::Error>,
) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", text()?)?,
        OutputFormat::Json => writeln!(out, "{}", report::to_json(value)?)?,
    }
    Ok(())
}

/// Runs one command against resolved settings.
pub fn run(
    command: &Command,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?command, ?settings, "running command");

    match command {
        Command::Compute {
            income,
            deductions,
            regime,
        } => {
            let regime = regime.unwrap_or(settings.regime);
            let result = calculate_tax_payable(*income, *deductions, regime);
            info!(%regime, total_tax = %result.total_tax, "computed");
            emit(out, settings.format, &result, || report::render_result(&result))
        }

        Command::Compare { income, deductions } => {
            let comparison = compare_regimes(*income, *deductions);
            emit(out, settings.format, &comparison, || {
                report::render_comparison(&comparison)
            })
        }

        Command::Slabs { regime } => {
            let regimes: Vec<Regime> = match regime {
                Some(regime) => vec![*regime],
                None => Regime::ALL.to_vec(),
            };
            let views: Vec<ScheduleView> = regimes.iter().map(|&r| schedule_view(r)).collect();
            emit(out, settings.format, &views, || {
                let schedules = regimes
                    .iter()
                    .map(|&r| report::render_schedule(r))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(schedules.join("\n"))
            })
        }

        Command::Batch { file } => {
            let scenarios = csv_loader::load_from_file(file)
                .with_context(|| format!("failed to load scenarios from '{}'", file.display()))?;

            let results: Vec<(String, tax_core::TaxComputationResult)> = scenarios
                .into_iter()
                .map(|scenario| {
                    let regime = scenario.regime_or(settings.regime);
                    let result =
                        calculate_tax_payable(scenario.gross_income, scenario.deductions, regime);
                    (scenario.label, result)
                })
                .collect();
            info!(rows = results.len(), "batch computed");

            let labelled: Vec<LabelledResult> = results
                .iter()
                .map(|(label, result)| LabelledResult { label, result })
                .collect();
            emit(out, settings.format, &labelled, || {
                let sections = labelled
                    .iter()
                    .map(|row| {
                        report::render_result(row.result)
                            .map(|text| format!("== {} ==\n{text}", row.label))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(sections.join("\n"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn run_to_string(
        command: Command,
        settings: &Settings,
    ) -> String {
        let mut out = Vec::new();
        run(&command, settings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn json_settings() -> Settings {
        Settings {
            format: OutputFormat::Json,
            ..Settings::default()
        }
    }

    #[test]
    fn compute_uses_settings_regime_when_unspecified() {
        let settings = Settings {
            regime: Regime::Old,
            format: OutputFormat::Json,
            ..Settings::default()
        };

        let text = run_to_string(
            Command::Compute {
                income: dec!(1200000),
                deductions: dec!(0),
                regime: None,
            },
            &settings,
        );
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["regime"], "old");
        assert_eq!(json["totalTax"], serde_json::json!(163800.0));
    }

    #[test]
    fn compute_text_renders_breakdown() {
        let text = run_to_string(
            Command::Compute {
                income: dec!(1200000),
                deductions: dec!(0),
                regime: Some(Regime::New),
            },
            &Settings::default(),
        );

        assert!(text.contains("Total tax payable"));
        assert!(text.contains("₹85,800"));
    }

    #[test]
    fn compare_json_includes_recommendation() {
        let text = run_to_string(
            Command::Compare {
                income: dec!(1200000),
                deductions: dec!(650000),
            },
            &json_settings(),
        );
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["recommended"], "old");
        assert_eq!(json["savings"], serde_json::json!(85800.0));
    }

    #[test]
    fn slabs_without_regime_prints_both() {
        let text = run_to_string(Command::Slabs { regime: None }, &Settings::default());

        assert!(text.contains("Old Regime, FY 2024-25"));
        assert!(text.contains("New Regime, FY 2024-25"));
    }

    #[test]
    fn slabs_json_lists_brackets_and_cess() {
        let text = run_to_string(
            Command::Slabs {
                regime: Some(Regime::New),
            },
            &json_settings(),
        );
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["financialYear"], "2024-25");
        assert_eq!(json[0]["brackets"].as_array().unwrap().len(), 6);
        assert_eq!(json[0]["cessRate"], serde_json::json!(0.04));
    }

    #[test]
    fn batch_text_heads_each_row_with_its_label() {
        let file = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_scenarios.csv");

        let text = run_to_string(Command::Batch { file: file.into() }, &Settings::default());

        assert!(text.starts_with("== junior engineer ==\nNew Regime, FY 2024-25\n"));
        assert!(text.contains("\n== senior engineer ==\n"));
        assert!(text.contains("₹85,800"));
    }

    #[test]
    fn batch_reports_missing_file_with_path() {
        let err = run(
            &Command::Batch {
                file: "/nonexistent/scenarios.csv".into(),
            },
            &Settings::default(),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("/nonexistent/scenarios.csv"));
    }
}
