use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use taxcmp_core::calculations::common::round_whole;
use taxcmp_core::{ProgressiveTaxCalculator, TaxCalculator};
use taxcmp_data::RegimeLoader;

/// Validate a regime file and print its bracket schedule.
///
/// The TOML file describes the whole regime; an optional CSV schedule
/// (columns `upper_bound,rate`, empty `upper_bound` for the top bracket)
/// replaces its brackets.
#[derive(Parser, Debug)]
#[command(name = "taxcmp-regime-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML regime file (defaults to the built-in Spanish regime)
    #[arg(short, long)]
    regime: Option<PathBuf>,

    /// Path to a CSV bracket schedule overriding the regime's brackets
    #[arg(short, long)]
    schedule: Option<PathBuf>,

    /// Gross incomes to evaluate after validation
    #[arg(short, long, value_delimiter = ',')]
    income: Vec<rust_decimal::Decimal>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = RegimeLoader::load(args.regime.as_deref(), args.schedule.as_deref())
        .context("Failed to load regime")?;

    println!("Regime '{}' is valid.", config.name);
    println!(
        "Social security: {} of gross, floor {}, ceiling {}",
        config.social_security.rate,
        config.social_security.floor,
        config
            .social_security
            .ceiling
            .map_or_else(|| "none".to_string(), |c| c.to_string()),
    );
    println!("Consumption tax: {} of gross", config.consumption_tax_rate);
    println!("Rounding: {:?}", config.rounding);

    let mut lower = rust_decimal::Decimal::ZERO;
    for bracket in &config.brackets {
        match bracket.upper_bound {
            Some(upper) => {
                println!("  {:>10} – {:>10}  {}", lower, upper, bracket.rate);
                lower = upper;
            }
            None => println!("  {:>10} –        ∞    {}", lower, bracket.rate),
        }
    }

    let calculator = ProgressiveTaxCalculator::new(config).context("Invalid regime")?;
    for gross in args.income {
        let breakdown = calculator.compute(gross);
        println!(
            "{}: total tax {} ({}%), net {}",
            gross,
            round_whole(breakdown.total_tax),
            breakdown.effective_rate,
            round_whole(breakdown.net_income),
        );
    }

    Ok(())
}
