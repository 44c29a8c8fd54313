//! The pass-through baseline: no local tax at all.
//!
//! Models a US LLC whose owner is non-resident, ignoring any federal or
//! state obligations. It exists so the progressive regime has something to
//! be compared against.

use rust_decimal::Decimal;

use super::TaxCalculator;
use crate::TaxBreakdown;

/// Calculator that always reports zero tax.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcmp_core::{FlatZeroCalculator, TaxCalculator};
///
/// let breakdown = FlatZeroCalculator::default().compute(dec!(50000.4));
///
/// assert_eq!(breakdown.total_tax, dec!(0));
/// assert_eq!(breakdown.net_income, dec!(50000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatZeroCalculator {
    name: String,
}

impl FlatZeroCalculator {
    /// Registry name of the built-in pass-through regime.
    pub const US_LLC: &'static str = "us-llc";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FlatZeroCalculator {
    fn default() -> Self {
        Self::new(Self::US_LLC)
    }
}

impl TaxCalculator for FlatZeroCalculator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(
        &self,
        gross_income: Decimal,
    ) -> TaxBreakdown {
        TaxBreakdown::untaxed(gross_income)
    }
}
