//! Comparisons over a range of incomes, one row per slider tick.

use std::io;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use taxcmp_core::{TaxCalculator, compare};
use thiserror::Error;
use tracing::debug;

/// Upper limit on rows produced by a single sweep.
pub const MAX_TICKS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    #[error("step must be positive, got {0}")]
    NonPositiveStep(Decimal),

    #[error("start {0} must not be negative")]
    NegativeStart(Decimal),

    #[error("end {end} is below start {start}")]
    InvertedRange { start: Decimal, end: Decimal },

    #[error("range produces {ticks} rows; at most {max} are allowed")]
    TooManyTicks { ticks: Decimal, max: usize },
}

/// An inclusive, evenly spaced income range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRange {
    start: Decimal,
    step: Decimal,
    count: usize,
}

impl SweepRange {
    /// Ticks run from `start` in increments of `step` up to and including
    /// `end` when it falls on a tick.
    pub fn new(
        start: Decimal,
        end: Decimal,
        step: Decimal,
    ) -> Result<Self, SweepError> {
        if step <= Decimal::ZERO {
            return Err(SweepError::NonPositiveStep(step));
        }
        if start < Decimal::ZERO {
            return Err(SweepError::NegativeStart(start));
        }
        if end < start {
            return Err(SweepError::InvertedRange { start, end });
        }

        // A quotient past `Decimal::MAX` is reported as the largest count.
        let ticks = (end - start)
            .checked_div(step)
            .and_then(|steps| steps.floor().checked_add(Decimal::ONE))
            .unwrap_or(Decimal::MAX);
        let count = ticks
            .to_usize()
            .filter(|count| *count <= MAX_TICKS)
            .ok_or(SweepError::TooManyTicks {
                ticks,
                max: MAX_TICKS,
            })?;

        Ok(Self { start, step, count })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ticks(&self) -> impl Iterator<Item = Decimal> + '_ {
        (0..self.count).map(|i| self.start + self.step * Decimal::from(i))
    }
}

/// One income tick of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepRow {
    pub gross_income: Decimal,
    pub baseline_tax: Decimal,
    pub alternative_tax: Decimal,
    pub savings: Decimal,
    pub savings_percentage: Decimal,
    pub baseline_effective_rate: Decimal,
}

/// Compares the two regimes at every tick of `range`.
pub fn sweep(
    baseline: &dyn TaxCalculator,
    alternative: &dyn TaxCalculator,
    range: &SweepRange,
) -> Vec<SweepRow> {
    debug!(
        baseline = baseline.name(),
        alternative = alternative.name(),
        rows = range.len(),
        "running sweep"
    );
    range
        .ticks()
        .map(|gross| {
            let comparison = compare(baseline, alternative, gross);
            SweepRow {
                gross_income: gross,
                baseline_tax: comparison.baseline.total_tax,
                alternative_tax: comparison.alternative.total_tax,
                savings: comparison.savings,
                savings_percentage: comparison.savings_percentage,
                baseline_effective_rate: comparison.baseline.effective_rate,
            }
        })
        .collect()
}

/// Writes rows as CSV with a header line.
pub fn write_csv<W: io::Write>(
    rows: &[SweepRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
