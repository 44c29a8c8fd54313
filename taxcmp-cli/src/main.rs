use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use taxcmp_cli::{Locale, app, logging, sweep};
use taxcmp_core::compare;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the tax burden of a Spanish freelancer with a pass-through
/// US LLC.
///
/// Built-in regimes are `es-autonomo` and `us-llc`; `--regime-file` and
/// `--brackets-csv` register a custom progressive regime.
#[derive(Debug, Parser)]
#[command(name = "taxcmp", version, about)]
struct Cli {
    /// TOML file describing a progressive regime.
    #[arg(long, global = true)]
    regime_file: Option<PathBuf>,

    /// CSV bracket schedule (`upper_bound,rate`) overriding the regime's brackets.
    #[arg(long, global = true)]
    brackets_csv: Option<PathBuf>,

    /// Regime being moved away from.
    #[arg(long, default_value = "es-autonomo", global = true)]
    from: String,

    /// Regime being moved to.
    #[arg(long, default_value = "us-llc", global = true)]
    to: String,

    /// How amounts are typed and displayed.
    #[arg(long, value_enum, default_value_t = Locale::Es, global = true)]
    locale: Locale,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes at one gross annual income.
    Compare {
        /// Gross annual income, e.g. `50.000` (es) or `50,000` (en).
        income: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Compare both regimes over an income range.
    Sweep {
        #[arg(long, default_value = "10000")]
        start: String,

        #[arg(long, default_value = "150000")]
        end: String,

        #[arg(long, default_value = "10000")]
        step: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List registered regimes.
    Regimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let registry = app::build_registry(cli.regime_file.as_deref(), cli.brackets_csv.as_deref())?;

    match cli.command {
        Command::Regimes => {
            for name in registry.available() {
                println!("{name}");
            }
        }
        Command::Compare { income, format } => {
            let gross = app::parse_income(&income, cli.locale)?;
            let baseline = registry.get(&cli.from)?;
            let alternative = registry.get(&cli.to)?;
            debug!(%gross, from = %cli.from, to = %cli.to, "comparing");

            let comparison = compare(baseline, alternative, gross);
            info!(
                savings = %comparison.savings,
                savings_percentage = %comparison.savings_percentage,
                "comparison complete"
            );

            match format {
                OutputFormat::Table => print!(
                    "{}",
                    app::render_comparison(&comparison, &cli.from, &cli.to, cli.locale)
                ),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&comparison)?)
                }
                OutputFormat::Csv => {
                    let range = sweep::SweepRange::new(gross, gross, rust_decimal::Decimal::ONE)?;
                    let rows = sweep::sweep(baseline, alternative, &range);
                    sweep::write_csv(&rows, io::stdout().lock())?;
                }
            }
        }
        Command::Sweep {
            start,
            end,
            step,
            format,
        } => {
            let range = sweep::SweepRange::new(
                app::parse_income(&start, cli.locale).context("invalid --start")?,
                app::parse_income(&end, cli.locale).context("invalid --end")?,
                app::parse_income(&step, cli.locale).context("invalid --step")?,
            )?;
            let baseline = registry.get(&cli.from)?;
            let alternative = registry.get(&cli.to)?;

            let rows = sweep::sweep(baseline, alternative, &range);
            info!(rows = rows.len(), "sweep complete");

            match format {
                OutputFormat::Table => print!(
                    "{}",
                    app::render_sweep_table(&rows, &cli.from, &cli.to, cli.locale)
                ),
                OutputFormat::Csv => sweep::write_csv(&rows, io::stdout().lock())?,
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
    }

    Ok(())
}
