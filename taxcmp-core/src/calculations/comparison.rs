//! Savings of one regime over another.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxCalculator;
use crate::TaxBreakdown;
use crate::calculations::common::percentage_of;

/// Two breakdowns for the same gross income and the difference between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// The regime being moved away from.
    pub baseline: TaxBreakdown,

    /// The regime being moved to.
    pub alternative: TaxBreakdown,

    /// `baseline.total_tax - alternative.total_tax`. Negative when the
    /// alternative is more expensive.
    pub savings: Decimal,

    /// Savings as a percentage of the baseline's gross income, one decimal.
    pub savings_percentage: Decimal,
}

impl Comparison {
    pub fn from_breakdowns(
        baseline: TaxBreakdown,
        alternative: TaxBreakdown,
    ) -> Self {
        let savings = baseline.total_tax - alternative.total_tax;
        let savings_percentage = percentage_of(savings, baseline.gross_income);
        Self {
            baseline,
            alternative,
            savings,
            savings_percentage,
        }
    }
}

/// Runs both calculators over `gross_income` and compares the results.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcmp_core::{FlatZeroCalculator, ProgressiveTaxCalculator, compare};
///
/// let comparison = compare(
///     &ProgressiveTaxCalculator::default(),
///     &FlatZeroCalculator::default(),
///     dec!(50000),
/// );
///
/// assert_eq!(comparison.savings, dec!(34166));
/// assert_eq!(comparison.savings_percentage, dec!(68.3));
/// ```
pub fn compare(
    baseline: &dyn TaxCalculator,
    alternative: &dyn TaxCalculator,
    gross_income: Decimal,
) -> Comparison {
    Comparison::from_breakdowns(
        baseline.compute(gross_income),
        alternative.compute(gross_income),
    )
}
