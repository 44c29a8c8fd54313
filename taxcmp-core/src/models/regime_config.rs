//! Parameters of a progressive tax regime.
//!
//! A [`RegimeConfig`] bundles everything the
//! [`ProgressiveTaxCalculator`](crate::ProgressiveTaxCalculator) needs: the
//! marginal bracket schedule, the clamped flat social-security levy, the flat
//! consumption levy and the rounding policy. The built-in default reproduces
//! the Spanish freelancer ("autónomo") figures used by the funnel calculator.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxcmp_core::{RegimeConfig, RegimeError, TaxBracket};
//!
//! let mut config = RegimeConfig::spanish_autonomo();
//! assert!(config.validate().is_ok());
//!
//! config.brackets.push(TaxBracket::bounded(dec!(500000), dec!(0.50)));
//! assert_eq!(
//!     config.validate(),
//!     Err(RegimeError::UnboundedBeforeLast { index: 5 })
//! );
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Errors raised when a regime's parameters are inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeError {
    /// The bracket schedule has no entries.
    #[error("bracket schedule is empty")]
    EmptySchedule,

    /// A bracket's upper bound is zero or negative.
    #[error("bracket {index} has non-positive upper bound {bound}")]
    NonPositiveBound { index: usize, bound: Decimal },

    /// Upper bounds must strictly increase.
    #[error("bracket {index} upper bound {bound} does not exceed previous bound {previous}")]
    UnsortedBounds {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    /// Only the final bracket may be open-ended.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    /// The final bracket must be open-ended so every income is covered.
    #[error("last bracket is capped at {0}; the top bracket must be unbounded")]
    BoundedLastBracket(Decimal),

    /// Marginal rates must be in `0..=1`.
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidBracketRate { index: usize, rate: Decimal },

    /// The social-security rate must be in `0..=1`.
    #[error("social security rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    /// The consumption levy rate must be in `0..=1`.
    #[error("consumption tax rate must be between 0 and 1, got {0}")]
    InvalidConsumptionRate(Decimal),

    /// The social-security floor must be non-negative.
    #[error("social security floor must be non-negative, got {0}")]
    NegativeFloor(Decimal),

    /// The floor cannot exceed the ceiling.
    #[error("social security floor {floor} exceeds ceiling {ceiling}")]
    FloorAboveCeiling { floor: Decimal, ceiling: Decimal },
}

/// How component amounts are rounded before they are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Each component is rounded to whole currency units, then summed.
    /// Matches the figures the funnel calculator displays.
    #[default]
    PerComponent,

    /// Components keep full precision and are summed exactly; rounding is
    /// left to the presentation layer.
    Deferred,
}

/// A proportional levy limited by a floor and an optional ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLevy {
    pub rate: Decimal,
    #[serde(default)]
    pub floor: Decimal,
    #[serde(default)]
    pub ceiling: Option<Decimal>,
}

impl FlatLevy {
    /// `min(max(base * rate, floor), ceiling)`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxcmp_core::FlatLevy;
    ///
    /// let levy = FlatLevy { rate: dec!(0.30), floor: dec!(3600), ceiling: Some(dec!(16000)) };
    ///
    /// assert_eq!(levy.apply(dec!(10000)), dec!(3600));
    /// assert_eq!(levy.apply(dec!(20000)), dec!(6000));
    /// assert_eq!(levy.apply(dec!(90000)), dec!(16000));
    /// ```
    pub fn apply(
        &self,
        base: Decimal,
    ) -> Decimal {
        let proportional = (base * self.rate).max(self.floor);
        match self.ceiling {
            Some(ceiling) => proportional.min(ceiling),
            None => proportional,
        }
    }
}

/// Full parameter set for a progressive regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Registry name, e.g. `es-autonomo`.
    pub name: String,

    /// Marginal schedule, ascending by upper bound, last bracket unbounded.
    pub brackets: Vec<TaxBracket>,

    /// Flat contribution deducted from gross before the bracket walk.
    pub social_security: FlatLevy,

    /// Flat levy applied to gross income.
    pub consumption_tax_rate: Decimal,

    #[serde(default)]
    pub rounding: RoundingMode,
}

impl RegimeConfig {
    /// Registry name of the built-in Spanish freelancer regime.
    pub const SPANISH_AUTONOMO: &'static str = "es-autonomo";

    /// Spanish freelancer regime: IRPF-style brackets, 30% social security
    /// clamped to 3,600..16,000 and a 21% VAT-equivalent on gross.
    pub fn spanish_autonomo() -> Self {
        Self {
            name: Self::SPANISH_AUTONOMO.to_string(),
            brackets: vec![
                TaxBracket::bounded(Decimal::new(12_450, 0), Decimal::new(19, 2)),
                TaxBracket::bounded(Decimal::new(20_200, 0), Decimal::new(24, 2)),
                TaxBracket::bounded(Decimal::new(35_200, 0), Decimal::new(30, 2)),
                TaxBracket::bounded(Decimal::new(60_000, 0), Decimal::new(37, 2)),
                TaxBracket::bounded(Decimal::new(300_000, 0), Decimal::new(45, 2)),
                TaxBracket::unbounded(Decimal::new(47, 2)),
            ],
            social_security: FlatLevy {
                rate: Decimal::new(30, 2),
                floor: Decimal::new(3_600, 0),
                ceiling: Some(Decimal::new(16_000, 0)),
            },
            consumption_tax_rate: Decimal::new(21, 2),
            rounding: RoundingMode::PerComponent,
        }
    }

    /// Checks the schedule and levy parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeError`] found, checking brackets in order
    /// before the levies.
    pub fn validate(&self) -> Result<(), RegimeError> {
        let Some(last_index) = self.brackets.len().checked_sub(1) else {
            return Err(RegimeError::EmptySchedule);
        };

        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if !is_unit_rate(bracket.rate) {
                return Err(RegimeError::InvalidBracketRate {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.upper_bound {
                None if index != last_index => {
                    return Err(RegimeError::UnboundedBeforeLast { index });
                }
                None => {}
                Some(bound) if index == last_index => {
                    return Err(RegimeError::BoundedLastBracket(bound));
                }
                Some(bound) if bound <= Decimal::ZERO => {
                    return Err(RegimeError::NonPositiveBound { index, bound });
                }
                Some(bound) if bound <= previous => {
                    return Err(RegimeError::UnsortedBounds {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(bound) => previous = bound,
            }
        }

        let levy = &self.social_security;
        if !is_unit_rate(levy.rate) {
            return Err(RegimeError::InvalidSocialSecurityRate(levy.rate));
        }
        if levy.floor < Decimal::ZERO {
            return Err(RegimeError::NegativeFloor(levy.floor));
        }
        if let Some(ceiling) = levy.ceiling {
            if levy.floor > ceiling {
                return Err(RegimeError::FloorAboveCeiling {
                    floor: levy.floor,
                    ceiling,
                });
            }
        }
        if !is_unit_rate(self.consumption_tax_rate) {
            return Err(RegimeError::InvalidConsumptionRate(
                self.consumption_tax_rate,
            ));
        }
        Ok(())
    }
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self::spanish_autonomo()
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // default regime
    // =========================================================================

    #[test]
    fn spanish_autonomo_is_valid() {
        assert_eq!(RegimeConfig::spanish_autonomo().validate(), Ok(()));
    }

    #[test]
    fn spanish_autonomo_matches_published_table() {
        let config = RegimeConfig::spanish_autonomo();

        let table: Vec<_> = config
            .brackets
            .iter()
            .map(|b| (b.upper_bound, b.rate))
            .collect();

        assert_eq!(
            table,
            vec![
                (Some(dec!(12450)), dec!(0.19)),
                (Some(dec!(20200)), dec!(0.24)),
                (Some(dec!(35200)), dec!(0.30)),
                (Some(dec!(60000)), dec!(0.37)),
                (Some(dec!(300000)), dec!(0.45)),
                (None, dec!(0.47)),
            ]
        );
        assert_eq!(config.consumption_tax_rate, dec!(0.21));
        assert_eq!(config.rounding, RoundingMode::PerComponent);
    }

    #[test]
    fn default_is_spanish_autonomo() {
        assert_eq!(RegimeConfig::default(), RegimeConfig::spanish_autonomo());
    }

    // =========================================================================
    // FlatLevy::apply
    // =========================================================================

    fn levy() -> FlatLevy {
        FlatLevy {
            rate: dec!(0.30),
            floor: dec!(3600),
            ceiling: Some(dec!(16000)),
        }
    }

    #[test]
    fn levy_applies_floor_below_threshold() {
        assert_eq!(levy().apply(dec!(11999)), dec!(3600));
    }

    #[test]
    fn levy_is_proportional_between_floor_and_ceiling() {
        assert_eq!(levy().apply(dec!(50000)), dec!(15000));
    }

    #[test]
    fn levy_applies_ceiling_above_threshold() {
        assert_eq!(levy().apply(dec!(53334)), dec!(16000));
    }

    #[test]
    fn levy_without_ceiling_is_uncapped() {
        let levy = FlatLevy {
            ceiling: None,
            ..levy()
        };

        assert_eq!(levy.apply(dec!(1000000)), dec!(300000));
    }

    #[test]
    fn levy_floor_applies_to_zero_base() {
        assert_eq!(levy().apply(dec!(0)), dec!(3600));
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn validate_rejects_empty_schedule() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets.clear();

        assert_eq!(config.validate(), Err(RegimeError::EmptySchedule));
    }

    #[test]
    fn validate_rejects_unsorted_bounds() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[1].upper_bound = Some(dec!(10000));

        assert_eq!(
            config.validate(),
            Err(RegimeError::UnsortedBounds {
                index: 1,
                bound: dec!(10000),
                previous: dec!(12450),
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_bounds() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[1].upper_bound = Some(dec!(12450));

        assert!(matches!(
            config.validate(),
            Err(RegimeError::UnsortedBounds { index: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_first_bound() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[0].upper_bound = Some(dec!(0));

        assert_eq!(
            config.validate(),
            Err(RegimeError::NonPositiveBound {
                index: 0,
                bound: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_unbounded_middle_bracket() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[2].upper_bound = None;

        assert_eq!(
            config.validate(),
            Err(RegimeError::UnboundedBeforeLast { index: 2 })
        );
    }

    #[test]
    fn validate_rejects_bounded_last_bracket() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[5].upper_bound = Some(dec!(1000000));

        assert_eq!(
            config.validate(),
            Err(RegimeError::BoundedLastBracket(dec!(1000000)))
        );
    }

    #[test]
    fn validate_accepts_single_unbounded_bracket() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets = vec![TaxBracket::unbounded(dec!(0.15))];

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.brackets[3].rate = dec!(1.5);

        assert_eq!(
            config.validate(),
            Err(RegimeError::InvalidBracketRate {
                index: 3,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_social_security_rate() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.social_security.rate = dec!(-0.1);

        assert_eq!(
            config.validate(),
            Err(RegimeError::InvalidSocialSecurityRate(dec!(-0.1)))
        );
    }

    #[test]
    fn validate_rejects_negative_floor() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.social_security.floor = dec!(-1);

        assert_eq!(config.validate(), Err(RegimeError::NegativeFloor(dec!(-1))));
    }

    #[test]
    fn validate_rejects_floor_above_ceiling() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.social_security.floor = dec!(20000);

        assert_eq!(
            config.validate(),
            Err(RegimeError::FloorAboveCeiling {
                floor: dec!(20000),
                ceiling: dec!(16000),
            })
        );
    }

    #[test]
    fn validate_rejects_consumption_rate_above_one() {
        let mut config = RegimeConfig::spanish_autonomo();
        config.consumption_tax_rate = dec!(2);

        assert_eq!(
            config.validate(),
            Err(RegimeError::InvalidConsumptionRate(dec!(2)))
        );
    }
}
