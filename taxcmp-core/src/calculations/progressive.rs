//! Bracketed income tax plus flat levies.
//!
//! # Calculation Order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Social security: gross × rate, clamped to floor and ceiling |
//! | 2    | Taxable income: gross − social security (minimum 0) |
//! | 3    | Income tax: marginal bracket walk over taxable income |
//! | 4    | Consumption tax: gross × rate (on gross, not the taxable base) |
//! | 5    | Total tax: sum of steps 3, 1 and 4 |
//! | 6    | Net income: gross − total tax |
//! | 7    | Effective rate: total ÷ gross × 100, one decimal (0 when gross is 0) |
//!
//! With [`RoundingMode::PerComponent`] steps 1, 3 and 4 are each rounded to
//! whole currency units before step 5, and step 6 is rounded as well.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxcmp_core::{ProgressiveTaxCalculator, TaxCalculator};
//!
//! let calculator = ProgressiveTaxCalculator::default();
//! let breakdown = calculator.compute(dec!(50000));
//!
//! assert_eq!(breakdown.social_security, dec!(15000));
//! assert_eq!(breakdown.income_tax, dec!(8666));
//! assert_eq!(breakdown.consumption_tax, dec!(10500));
//! assert_eq!(breakdown.total_tax, dec!(34166));
//! assert_eq!(breakdown.net_income, dec!(15834));
//! assert_eq!(breakdown.effective_rate, dec!(68.3));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use super::TaxCalculator;
use crate::calculations::common::round_whole;
use crate::{BracketSlice, RegimeConfig, RegimeError, RoundingMode, TaxBreakdown};

/// Calculator for a progressive regime described by a [`RegimeConfig`].
#[derive(Debug, Clone)]
pub struct ProgressiveTaxCalculator {
    config: RegimeConfig,
}

impl ProgressiveTaxCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeError`] if the schedule or levies are inconsistent.
    pub fn new(config: RegimeConfig) -> Result<Self, RegimeError> {
        config.validate()?;
        debug!(
            regime = %config.name,
            brackets = config.brackets.len(),
            rounding = ?config.rounding,
            "progressive calculator configured"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Social-security levy on gross income, unrounded.
    pub fn social_security(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        self.config.social_security.apply(gross_income)
    }

    /// Income subject to the bracket walk. Never negative.
    pub fn taxable_income(
        &self,
        gross_income: Decimal,
        social_security: Decimal,
    ) -> Decimal {
        (gross_income - social_security).max(Decimal::ZERO)
    }

    /// Splits `taxable_income` across the schedule, lowest bracket first.
    ///
    /// Only brackets that receive a positive slice appear in the result.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxcmp_core::ProgressiveTaxCalculator;
    ///
    /// let calculator = ProgressiveTaxCalculator::default();
    /// let slices = calculator.bracket_walk(dec!(35000));
    ///
    /// let taxes: Vec<_> = slices.iter().map(|s| s.tax).collect();
    /// assert_eq!(taxes, vec![dec!(2365.5), dec!(1860), dec!(4440)]);
    /// ```
    pub fn bracket_walk(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BracketSlice> {
        let mut slices = Vec::new();
        let mut remaining = taxable_income;
        let mut previous_limit = Decimal::ZERO;

        for bracket in &self.config.brackets {
            let slice = match bracket.width(previous_limit) {
                Some(width) => remaining.min(width),
                None => remaining,
            };

            if slice > Decimal::ZERO {
                let tax = slice * bracket.rate;
                trace!(
                    lower = %previous_limit,
                    rate = %bracket.rate,
                    slice = %slice,
                    tax = %tax,
                    "bracket slice"
                );
                slices.push(BracketSlice {
                    lower_bound: previous_limit,
                    upper_bound: bracket.upper_bound,
                    rate: bracket.rate,
                    taxed_amount: slice,
                    tax,
                });
                remaining -= slice;
            }

            if let Some(upper) = bracket.upper_bound {
                previous_limit = upper;
            }
            if remaining <= Decimal::ZERO {
                break;
            }
        }

        slices
    }

    /// Progressive income tax on `taxable_income`, unrounded.
    pub fn income_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.bracket_walk(taxable_income)
            .iter()
            .map(|slice| slice.tax)
            .sum()
    }

    /// Consumption levy on gross income, unrounded.
    pub fn consumption_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        gross_income * self.config.consumption_tax_rate
    }
}

impl Default for ProgressiveTaxCalculator {
    /// The built-in Spanish freelancer regime.
    fn default() -> Self {
        Self {
            config: RegimeConfig::spanish_autonomo(),
        }
    }
}

impl TaxCalculator for ProgressiveTaxCalculator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn compute(
        &self,
        gross_income: Decimal,
    ) -> TaxBreakdown {
        if gross_income < Decimal::ZERO {
            warn!(
                regime = %self.config.name,
                gross_income = %gross_income,
                "negative gross income; breakdown is not meaningful"
            );
        }

        let social_security = self.social_security(gross_income);
        let taxable_income = self.taxable_income(gross_income, social_security);
        let income_tax = self.income_tax(taxable_income);
        let consumption_tax = self.consumption_tax(gross_income);

        match self.config.rounding {
            RoundingMode::PerComponent => TaxBreakdown::from_components(
                gross_income,
                round_whole(income_tax),
                round_whole(social_security),
                round_whole(consumption_tax),
                round_whole,
            ),
            RoundingMode::Deferred => TaxBreakdown::from_components(
                gross_income,
                income_tax,
                social_security,
                consumption_tax,
                |net| net,
            ),
        }
    }
}
