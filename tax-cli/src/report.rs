//! Text and JSON rendering of computation results.

use std::fmt::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::schedules::FINANCIAL_YEAR;
use tax_core::{
    CESS_RATE, Regime, RegimeComparison, SlabTaxLine, TaxBracket, TaxComputationResult,
    regime_config, surcharge_tiers,
};

use crate::utils::{format_inr, format_rate, opt_amount_display};

const LABEL_WIDTH: usize = 30;
const AMOUNT_WIDTH: usize = 16;

/// A labelled batch result, serialized as `{"label": ..., "result": {...}}`.
#[derive(Debug, Serialize)]
pub struct LabelledResult<'a> {
    pub label: &'a str,
    pub result: &'a TaxComputationResult,
}

/// Pretty-printed JSON for any report value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn line(
    out: &mut String,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(out, "  {label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}", format_inr(amount))
}

/// Income range as printed in the published tables, e.g. `₹3,00,001 - ₹6,00,000`.
fn slab_range(bracket: &TaxBracket) -> String {
    let lower = format_inr(bracket.inclusive_min_income());
    let upper = opt_amount_display(bracket.max_income);
    if bracket.is_unbounded() {
        format!("{lower} {upper}")
    } else {
        format!("{lower} - {upper}")
    }
}

fn slab_line(
    out: &mut String,
    slab: &SlabTaxLine,
) -> fmt::Result {
    writeln!(
        out,
        "    {:<28}{:>6}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        slab_range(&slab.bracket()),
        format_rate(slab.tax_rate),
        format_inr(slab.income_in_bracket),
        format_inr(slab.tax),
    )
}

/// Itemised breakdown of one computation.
pub fn render_result(result: &TaxComputationResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}, FY {FINANCIAL_YEAR}", result.regime.label())?;

    line(&mut out, "Gross income", result.gross_income)?;
    if result.regime == Regime::Old {
        line(&mut out, "Deductions (Chapter VI-A)", result.total_deductions)?;
    }
    line(&mut out, "Taxable income", result.taxable_income)?;

    if !result.slab_breakdown.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "    {:<28}{:>6}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Slab", "Rate", "Income", "Tax"
        )?;
        for slab in &result.slab_breakdown {
            slab_line(&mut out, slab)?;
        }
    }

    writeln!(out)?;
    line(&mut out, "Tax on slabs", result.tax_before_rebate)?;
    line(&mut out, "Rebate u/s 87A", result.rebate)?;
    line(&mut out, "Tax after rebate", result.tax_after_rebate)?;
    line(&mut out, "Surcharge", result.surcharge)?;
    if !result.marginal_relief.is_zero() {
        line(&mut out, "  (after marginal relief of)", result.marginal_relief)?;
    }
    line(&mut out, "Tax before cess", result.tax_before_cess)?;
    line(&mut out, "Health and education cess", result.cess)?;
    line(&mut out, "Total tax payable", result.total_tax)?;
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Effective rate",
        format_rate(result.effective_rate())
    )?;

    Ok(out)
}

/// Both regimes side by side, then the recommendation.
pub fn render_comparison(comparison: &RegimeComparison) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        "",
        Regime::Old.label(),
        Regime::New.label()
    )?;

    let rows: [(&str, fn(&TaxComputationResult) -> Decimal); 7] = [
        ("Taxable income", |r| r.taxable_income),
        ("Tax on slabs", |r| r.tax_before_rebate),
        ("Rebate u/s 87A", |r| r.rebate),
        ("Surcharge", |r| r.surcharge),
        ("Marginal relief", |r| r.marginal_relief),
        ("Health and education cess", |r| r.cess),
        ("Total tax payable", |r| r.total_tax),
    ];
    for (label, field) in rows {
        let old = format_inr(field(&comparison.old));
        let new = format_inr(field(&comparison.new));
        writeln!(out, "  {label:<LABEL_WIDTH$}{old:>AMOUNT_WIDTH$}{new:>AMOUNT_WIDTH$}")?;
    }
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Effective rate",
        format_rate(comparison.old.effective_rate()),
        format_rate(comparison.new.effective_rate())
    )?;

    writeln!(out)?;
    if comparison.savings.is_zero() {
        writeln!(
            out,
            "Both regimes cost the same; {} recommended.",
            comparison.recommended.label()
        )?;
    } else {
        writeln!(
            out,
            "{} recommended, saving {}.",
            comparison.recommended.label(),
            format_inr(comparison.savings)
        )?;
    }

    Ok(out)
}

/// The FY slab table, surcharge tiers and cess rate for `regime`.
pub fn render_schedule(regime: Regime) -> Result<String, fmt::Error> {
    let config = regime_config(regime);
    let mut out = String::new();

    writeln!(out, "{}, FY {FINANCIAL_YEAR}", regime.label())?;
    writeln!(out, "  {:<28}{:>6}", "Taxable income", "Rate")?;
    for bracket in &config.brackets {
        writeln!(
            out,
            "  {:<28}{:>6}",
            slab_range(bracket),
            format_rate(bracket.tax_rate)
        )?;
    }

    writeln!(out)?;
    line(&mut out, "Standard deduction", config.standard_deduction)?;
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Rebate u/s 87A",
        format!(
            "up to {} if taxable income <= {}",
            format_inr(config.rebate_max_amount),
            format_inr(config.rebate_threshold)
        )
    )?;

    writeln!(out)?;
    writeln!(out, "  {:<28}{:>6}", "Surcharge on income", "Rate")?;
    let mut lower = Decimal::ZERO;
    for tier in surcharge_tiers() {
        let rate = match regime {
            Regime::New => tier.rate.min(tier.new_regime_cap),
            Regime::Old => tier.rate,
        };
        let band = TaxBracket::new(lower, tier.income_upper_bound, rate);
        writeln!(out, "  {:<28}{:>6}", slab_range(&band), format_rate(rate))?;
        lower = tier.income_upper_bound.unwrap_or(lower);
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Health and education cess",
        format_rate(CESS_RATE)
    )?;

    Ok(out)
}
