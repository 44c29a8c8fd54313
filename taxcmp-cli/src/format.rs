//! Currency and percentage formatting, and lenient amount parsing.
//!
//! The calculators are locale-agnostic; everything about how an amount looks
//! on screen or how a user types it lives here.

use rust_decimal::Decimal;
use taxcmp_core::calculations::common::{round_one_decimal, round_whole};
use thiserror::Error;

const NBSP: char = '\u{a0}';

/// Display conventions for amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Locale {
    /// `34.166 €`, `68,3 %`. Four-digit amounts are not grouped.
    #[default]
    Es,
    /// `€34,166`, `68.3%`.
    En,
}

impl Locale {
    fn group_separator(self) -> char {
        match self {
            Locale::Es => '.',
            Locale::En => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::Es => ',',
            Locale::En => '.',
        }
    }

    /// Shortest integer part that gets grouping separators.
    fn min_grouped_digits(self) -> usize {
        match self {
            Locale::Es => 5,
            Locale::En => 4,
        }
    }
}

/// Error returned when user input cannot be read as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips whitespace and currency symbols, drops grouping separators and
/// normalizes the decimal separator to `.`.
fn normalize_amount_input(
    s: &str,
    locale: Locale,
) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '$')
        .filter(|c| *c != locale.group_separator())
        .map(|c| {
            if c == locale.decimal_separator() {
                '.'
            } else {
                c
            }
        })
        .collect()
}

/// Parses a user-typed amount.
///
/// Handles the locale's thousands separator (`"50.000"` in `es`,
/// `"50,000"` in `en`), surrounding whitespace and a `€`/`$` symbol.
/// Empty input is treated as 0.
pub fn parse_amount(
    s: &str,
    locale: Locale,
) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s, locale);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

fn group_digits(
    digits: &str,
    locale: Locale,
) -> String {
    if digits.len() < locale.min_grouped_digits() {
        return digits.to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(locale.group_separator());
        }
        grouped.push(c);
    }
    grouped
}

/// Formats a euro amount with no decimals.
pub fn format_currency(
    value: Decimal,
    locale: Locale,
) -> String {
    let rounded = round_whole(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = group_digits(&rounded.abs().trunc().to_string(), locale);
    match locale {
        Locale::Es => format!("{sign}{digits}{NBSP}€"),
        Locale::En => format!("{sign}€{digits}"),
    }
}

/// Formats a percentage with one decimal.
pub fn format_percent(
    value: Decimal,
    locale: Locale,
) -> String {
    let text = format!("{:.1}", round_one_decimal(value));
    match locale {
        Locale::Es => format!("{}{NBSP}%", text.replace('.', ",")),
        Locale::En => format!("{text}%"),
    }
}
