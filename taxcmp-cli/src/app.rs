use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use taxcmp_core::{Comparison, ProgressiveTaxCalculator, RegimeRegistry, TaxBreakdown};
use taxcmp_data::RegimeLoader;
use tracing::{debug, warn};

use crate::format::{Locale, format_currency, format_percent, parse_amount};
use crate::sweep::SweepRow;

/// Builds the registry of available regimes.
///
/// The built-in regimes are always present. When a regime file or bracket
/// schedule is supplied, the resulting progressive regime is registered under
/// its configured name, replacing a built-in of the same name.
pub fn build_registry(
    regime_file: Option<&Path>,
    schedule_file: Option<&Path>,
) -> Result<RegimeRegistry> {
    let mut registry = RegimeRegistry::with_builtins();

    if regime_file.is_some() || schedule_file.is_some() {
        let config =
            RegimeLoader::load(regime_file, schedule_file).context("Failed to load regime")?;
        let calculator = ProgressiveTaxCalculator::new(config).context("Invalid regime")?;
        registry.register(Box::new(calculator));
    }

    debug!(regimes = ?registry.available(), "registry ready");
    Ok(registry)
}

/// Reads an income typed by the user. Negative amounts are clamped to zero
/// since the calculators only accept non-negative income.
pub fn parse_income(
    input: &str,
    locale: Locale,
) -> Result<Decimal> {
    let amount = parse_amount(input, locale)?;
    if amount < Decimal::ZERO {
        warn!(income = %amount, "negative income clamped to zero");
        return Ok(Decimal::ZERO);
    }
    Ok(amount)
}

fn breakdown_lines(
    out: &mut String,
    title: &str,
    breakdown: &TaxBreakdown,
    locale: Locale,
) -> std::fmt::Result {
    let money = |value| format_currency(value, locale);
    writeln!(out, "{title}")?;
    writeln!(out, "  {:<18}{:>16}", "Income tax", money(breakdown.income_tax))?;
    writeln!(out, "  {:<18}{:>16}", "Social security", money(breakdown.social_security))?;
    writeln!(out, "  {:<18}{:>16}", "Consumption tax", money(breakdown.consumption_tax))?;
    writeln!(out, "  {:<18}{:>16}", "Total tax", money(breakdown.total_tax))?;
    writeln!(out, "  {:<18}{:>16}", "Net income", money(breakdown.net_income))?;
    writeln!(
        out,
        "  {:<18}{:>16}",
        "Effective rate",
        format_percent(breakdown.effective_rate, locale)
    )
}

fn comparison_report(
    out: &mut String,
    comparison: &Comparison,
    baseline_name: &str,
    alternative_name: &str,
    locale: Locale,
) -> std::fmt::Result {
    writeln!(
        out,
        "Gross income: {}\n",
        format_currency(comparison.baseline.gross_income, locale)
    )?;
    breakdown_lines(out, baseline_name, &comparison.baseline, locale)?;
    writeln!(out)?;
    breakdown_lines(out, alternative_name, &comparison.alternative, locale)?;
    writeln!(
        out,
        "\nSavings: {} ({})",
        format_currency(comparison.savings, locale),
        format_percent(comparison.savings_percentage, locale)
    )
}

fn sweep_table(
    out: &mut String,
    rows: &[SweepRow],
    baseline_name: &str,
    alternative_name: &str,
    locale: Locale,
) -> std::fmt::Result {
    writeln!(
        out,
        "{:>14}{:>16}{:>16}{:>16}{:>10}",
        "Gross", baseline_name, alternative_name, "Savings", "Rate"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>14}{:>16}{:>16}{:>16}{:>10}",
            format_currency(row.gross_income, locale),
            format_currency(row.baseline_tax, locale),
            format_currency(row.alternative_tax, locale),
            format_currency(row.savings, locale),
            format_percent(row.baseline_effective_rate, locale),
        )?;
    }
    Ok(())
}

/// Renders a comparison as a plain-text report.
pub fn render_comparison(
    comparison: &Comparison,
    baseline_name: &str,
    alternative_name: &str,
    locale: Locale,
) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never returns an error.
    let _ = comparison_report(&mut out, comparison, baseline_name, alternative_name, locale);
    out
}

/// Renders sweep rows as an aligned text table.
pub fn render_sweep_table(
    rows: &[SweepRow],
    baseline_name: &str,
    alternative_name: &str,
    locale: Locale,
) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never returns an error.
    let _ = sweep_table(&mut out, rows, baseline_name, alternative_name, locale);
    out
}
