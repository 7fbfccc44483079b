//! Locale-aware rendering of money, percentages and counts for reports.
//!
//! The projection engine only ever emits raw `Decimal` figures; everything
//! here is presentation and has no effect on computed values.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MarketStudyError;
use crate::types::{Money, Percent};

/// Display locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// "1 234,5 €", "12,5 %"
    #[default]
    FrFr,
    /// "€1,234.5", "12.5%"
    EnUs,
}

impl Locale {
    fn group_separator(self) -> char {
        match self {
            Locale::FrFr => ' ',
            Locale::EnUs => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::FrFr => ',',
            Locale::EnUs => '.',
        }
    }
}

impl FromStr for Locale {
    type Err = MarketStudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" | "fr_fr" => Ok(Locale::FrFr),
            "en" | "en-us" | "en_us" => Ok(Locale::EnUs),
            other => Err(MarketStudyError::InvalidInput {
                field: "locale".into(),
                reason: format!("unsupported locale '{other}' (expected fr or en)"),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::FrFr => write!(f, "fr-FR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

/// Format a number with locale grouping.
///
/// `decimals: None` rounds to at most two places and drops trailing zeros;
/// `Some(n)` always prints exactly `n` places.
pub fn format_number(value: Decimal, decimals: Option<u32>, locale: Locale) -> String {
    let (negative, body) = render_unsigned(value, decimals, locale);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Format an amount in euros.
pub fn format_currency(value: Money, locale: Locale) -> String {
    let (negative, body) = render_unsigned(value, None, locale);
    let sign = if negative { "-" } else { "" };
    match locale {
        Locale::FrFr => format!("{sign}{body} €"),
        Locale::EnUs => format!("{sign}€{body}"),
    }
}

/// Format a percentage given in percent units (12.5 renders as "12,5 %").
pub fn format_percent(value: Percent, decimals: u32, locale: Locale) -> String {
    let (negative, body) = render_unsigned(value, Some(decimals), locale);
    let sign = if negative { "-" } else { "" };
    match locale {
        Locale::FrFr => format!("{sign}{body} %"),
        Locale::EnUs => format!("{sign}{body}%"),
    }
}

/// Chart-axis label in thousands of euros, e.g. "120k €".
pub fn format_compact_thousands(value: Money, locale: Locale) -> String {
    let thousands = value / Decimal::ONE_THOUSAND;
    let (negative, body) = render_unsigned(round_half_up(thousands, 1), None, locale);
    let sign = if negative { "-" } else { "" };
    match locale {
        Locale::FrFr => format!("{sign}{body}k €"),
        Locale::EnUs => format!("{sign}€{body}k"),
    }
}

/// Pick the singular or plural form for `count`; only exactly one is singular.
pub fn pluralize<'a>(count: i64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Human label for a break-even quarter.
pub fn format_breakeven(period: Option<u32>, locale: Locale) -> String {
    match (period, locale) {
        (Some(q), Locale::FrFr) => format!("Trimestre {q}"),
        (Some(q), Locale::EnUs) => format!("Quarter {q}"),
        (None, Locale::FrFr) => "Non atteint".to_string(),
        (None, Locale::EnUs) => "Not reached".to_string(),
    }
}

/// Display rounding: ties go away from zero, unlike the engine's banker's rounding.
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn render_unsigned(value: Decimal, decimals: Option<u32>, locale: Locale) -> (bool, String) {
    let rounded = match decimals {
        Some(dp) => round_half_up(value, dp),
        None => round_half_up(value, 2).normalize(),
    };
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = match decimals {
        Some(dp) => format!("{:.*}", dp as usize, rounded.abs()),
        None => rounded.abs().to_string(),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = group_digits(int_part, locale.group_separator());
    if let Some(frac) = frac_part {
        if !frac.is_empty() {
            out.push(locale.decimal_separator());
            out.push_str(frac);
        }
    }
    (negative, out)
}

fn group_digits(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_fr_groups_thousands() {
        assert_eq!(format_currency(dec!(1234), Locale::FrFr), "1 234 €");
        assert_eq!(format_currency(dec!(1234567.5), Locale::FrFr), "1 234 567,5 €");
        assert_eq!(format_currency(dec!(89), Locale::FrFr), "89 €");
    }

    #[test]
    fn test_currency_en() {
        assert_eq!(format_currency(dec!(1234.56), Locale::EnUs), "€1,234.56");
        assert_eq!(format_currency(dec!(-444352.46), Locale::EnUs), "-€444,352.46");
    }

    #[test]
    fn test_currency_negative_fr() {
        assert_eq!(format_currency(dec!(-100000), Locale::FrFr), "-100 000 €");
    }

    #[test]
    fn test_currency_rounds_to_cents() {
        assert_eq!(format_currency(dec!(10.005), Locale::EnUs), "€10.01");
        assert_eq!(format_currency(dec!(10.015), Locale::EnUs), "€10.02");
        assert_eq!(format_currency(dec!(10.005), Locale::FrFr), "10,01 €");
        assert_eq!(format_currency(dec!(-10.005), Locale::FrFr), "-10,01 €");
    }

    #[test]
    fn test_fixed_decimals_round_ties_away_from_zero() {
        assert_eq!(format_percent(dec!(2.5), 0, Locale::EnUs), "3%");
        assert_eq!(format_number(dec!(0.25), Some(1), Locale::FrFr), "0,3");
        assert_eq!(format_compact_thousands(dec!(2250), Locale::EnUs), "€2.3k");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.001), Locale::FrFr), "0 €");
    }

    #[test]
    fn test_percent_fixed_decimals() {
        assert_eq!(format_percent(dec!(12.5), 1, Locale::FrFr), "12,5 %");
        assert_eq!(format_percent(dec!(4.5), 2, Locale::EnUs), "4.50%");
        assert_eq!(format_percent(dec!(30), 0, Locale::FrFr), "30 %");
    }

    #[test]
    fn test_compact_thousands() {
        assert_eq!(format_compact_thousands(dec!(120000), Locale::FrFr), "120k €");
        assert_eq!(format_compact_thousands(dec!(-54347.58), Locale::EnUs), "-€54.3k");
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(format_number(dec!(999), None, Locale::EnUs), "999");
        assert_eq!(format_number(dec!(1000), None, Locale::EnUs), "1,000");
        assert_eq!(format_number(dec!(194.277726), Some(1), Locale::FrFr), "194,3");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "quarter", "quarters"), "quarter");
        assert_eq!(pluralize(2, "quarter", "quarters"), "quarters");
        assert_eq!(pluralize(0, "quarter", "quarters"), "quarters");
        assert_eq!(pluralize(-1, "quarter", "quarters"), "quarters");
    }

    #[test]
    fn test_breakeven_labels() {
        assert_eq!(format_breakeven(Some(6), Locale::FrFr), "Trimestre 6");
        assert_eq!(format_breakeven(None, Locale::EnUs), "Not reached");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("fr".parse::<Locale>().unwrap(), Locale::FrFr);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("de".parse::<Locale>().is_err());
    }
}
