//! Tax burden calculators.
//!
//! Every regime implements [`TaxCalculator`]: a pure mapping from gross
//! annual income to a [`TaxBreakdown`]. Two implementations ship with the
//! crate, the bracketed [`ProgressiveTaxCalculator`] and the pass-through
//! [`FlatZeroCalculator`]; [`compare`] derives the savings between any two
//! breakdowns.

pub mod common;
pub mod comparison;
pub mod flat_zero;
pub mod progressive;

#[cfg(test)]
mod proptests;

use rust_decimal::Decimal;

use crate::TaxBreakdown;

pub use comparison::{Comparison, compare};
pub use flat_zero::FlatZeroCalculator;
pub use progressive::ProgressiveTaxCalculator;

/// A jurisdiction's tax model.
///
/// Implementations must be deterministic and free of side effects so they
/// can be called on every slider tick and shared across threads.
pub trait TaxCalculator: Send + Sync + std::fmt::Debug {
    /// Short identifier, e.g. `es-autonomo`.
    fn name(&self) -> &str;

    /// Computes the breakdown for `gross_income`. Callers are expected to
    /// pass non-negative values; negative input does not panic but the
    /// result is meaningless.
    fn compute(
        &self,
        gross_income: Decimal,
    ) -> TaxBreakdown;
}
