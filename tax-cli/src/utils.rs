use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use thiserror::Error;

/// Error returned when a string cannot be read as a rupee amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    /// Not a recognisable amount (bad characters, negative sign, unknown unit).
    #[error("invalid amount '{0}' (expected e.g. 1200000, 12,00,000, 12L or 1.1Cr)")]
    Invalid(String),

    /// Looked like a number but did not fit a decimal.
    #[error("invalid amount '{input}': {source}")]
    Decimal {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:₹|rs\.?|inr)?\s*([0-9]+(?:\.[0-9]+)?)\s*(k|l|lac|lacs|lakh|lakhs|cr|crore|crores)?$")
        .expect("amount pattern is valid")
});

/// Normalizes input for amount parsing: trims whitespace and removes commas,
/// so both Indian (`12,00,000`) and Western (`1,200,000`) grouping work.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

fn unit_multiplier(unit: &str) -> Decimal {
    match unit.to_ascii_lowercase().as_str() {
        "k" => Decimal::from(1_000),
        "l" | "lac" | "lacs" | "lakh" | "lakhs" => Decimal::from(100_000),
        "cr" | "crore" | "crores" => Decimal::from(10_000_000),
        _ => Decimal::ONE,
    }
}

/// Parses a non-negative rupee amount.
///
/// Accepts plain numbers, comma grouping, an optional `₹`/`Rs`/`INR` prefix
/// and a `K`, `L`/`lakh` or `Cr`/`crore` suffix. Empty or whitespace-only
/// input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let captures = AMOUNT.captures(&normalized).ok_or_else(|| {
        tracing::error!(input = %s, "invalid amount");
        ParseAmountError::Invalid(s.to_string())
    })?;

    let number: Decimal = captures[1]
        .parse()
        .map_err(|source| ParseAmountError::Decimal {
            input: s.to_string(),
            source,
        })?;
    let multiplier = captures
        .get(2)
        .map_or(Decimal::ONE, |unit| unit_multiplier(unit.as_str()));

    number
        .checked_mul(multiplier)
        .ok_or_else(|| ParseAmountError::Invalid(s.to_string()))
}

/// Parses an optional amount. Returns `None` for empty input; invalid input
/// is an error rather than silently dropped.
pub fn parse_optional_amount(s: &str) -> Result<Option<Decimal>, ParseAmountError> {
    if normalize_amount_input(s).is_empty() {
        Ok(None)
    } else {
        parse_amount(s).map(Some)
    }
}

/// Groups integer digits the Indian way: last three, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats rupees with Indian digit grouping, e.g. `₹12,00,000` or
/// `₹1,234.50`. Paise are shown only when non-zero.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, paise) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    if paise == "00" {
        format!("{sign}₹{}", group_indian(whole))
    } else {
        format!("{sign}₹{}.{paise}", group_indian(whole))
    }
}

/// Formats a fractional rate as a percentage, e.g. `0.05` -> `5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Formats an optional upper bound, using "and above" for open-ended slabs.
pub fn opt_amount_display(d: Option<Decimal>) -> String {
    d.map(format_inr).unwrap_or_else(|| "and above".to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("1200000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("  1234.56  ").unwrap(), dec!(1234.56));
    }

    #[test]
    fn parse_amount_accepts_indian_and_western_grouping() {
        assert_eq!(parse_amount("12,00,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("1,200,000").unwrap(), dec!(1200000));
    }

    #[test]
    fn parse_amount_accepts_lakh_and_crore_suffixes() {
        assert_eq!(parse_amount("12L").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("7.5 lakh").unwrap(), dec!(750000));
        assert_eq!(parse_amount("1.1Cr").unwrap(), dec!(11000000));
        assert_eq!(parse_amount("2 crore").unwrap(), dec!(20000000));
        assert_eq!(parse_amount("50k").unwrap(), dec!(50000));
    }

    #[test]
    fn parse_amount_accepts_currency_prefix() {
        assert_eq!(parse_amount("₹12,00,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("Rs. 5L").unwrap(), dec!(500000));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_negative_and_garbage() {
        assert!(matches!(parse_amount("-5000"), Err(ParseAmountError::Invalid(_))));
        assert!(matches!(parse_amount("abc"), Err(ParseAmountError::Invalid(_))));
        assert!(matches!(parse_amount("12 million"), Err(ParseAmountError::Invalid(_))));
    }

    #[test]
    fn parse_optional_amount_handles_empty_and_invalid() {
        assert_eq!(parse_optional_amount("").unwrap(), None);
        assert_eq!(parse_optional_amount("1.5L").unwrap(), Some(dec!(150000)));
        assert!(parse_optional_amount("lots").is_err());
    }

    #[test]
    fn format_inr_uses_indian_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(85800)), "₹85,800");
        assert_eq!(format_inr(dec!(1200000)), "₹12,00,000");
        assert_eq!(format_inr(dec!(110000000)), "₹11,00,00,000");
    }

    #[test]
    fn format_inr_shows_paise_only_when_present() {
        assert_eq!(format_inr(dec!(25000.10)), "₹25,000.10");
        assert_eq!(format_inr(dec!(3300.00)), "₹3,300");
        assert_eq!(format_inr(dec!(-1500.5)), "-₹1,500.50");
    }

    #[test]
    fn format_rate_renders_percentages() {
        assert_eq!(format_rate(dec!(0.05)), "5%");
        assert_eq!(format_rate(dec!(0.37)), "37%");
        assert_eq!(format_rate(dec!(0.125)), "12.5%");
        assert_eq!(format_rate(dec!(0)), "0%");
    }
}
