use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percentage_of, round_whole};

/// Result of running a regime over one gross income figure.
///
/// `total_tax` is always exactly `income_tax + social_security +
/// consumption_tax`; whether those components are whole currency units
/// depends on the regime's [`RoundingMode`](crate::RoundingMode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross_income: Decimal,

    /// Progressive income tax on the taxable base.
    pub income_tax: Decimal,

    /// Flat social-security contribution, clamped to the regime's floor and ceiling.
    pub social_security: Decimal,

    /// Flat consumption levy on gross income.
    pub consumption_tax: Decimal,

    pub total_tax: Decimal,
    pub net_income: Decimal,

    /// Total tax as a percentage of gross income, one decimal place.
    pub effective_rate: Decimal,
}

impl TaxBreakdown {
    /// A breakdown with no tax at all: every component is zero and the whole
    /// (rounded) gross income is kept.
    pub fn untaxed(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            income_tax: Decimal::ZERO,
            social_security: Decimal::ZERO,
            consumption_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            net_income: round_whole(gross_income),
            effective_rate: Decimal::ZERO,
        }
    }

    /// Assembles a breakdown from already-rounded components, deriving the
    /// total, net income and effective rate.
    pub(crate) fn from_components(
        gross_income: Decimal,
        income_tax: Decimal,
        social_security: Decimal,
        consumption_tax: Decimal,
        net_rounding: impl Fn(Decimal) -> Decimal,
    ) -> Self {
        let total_tax = income_tax + social_security + consumption_tax;
        Self {
            gross_income,
            income_tax,
            social_security,
            consumption_tax,
            total_tax,
            net_income: net_rounding(gross_income - total_tax),
            effective_rate: percentage_of(total_tax, gross_income),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn untaxed_keeps_rounded_gross() {
        let breakdown = TaxBreakdown::untaxed(dec!(41999.50));

        assert_eq!(breakdown.total_tax, dec!(0));
        assert_eq!(breakdown.net_income, dec!(42000));
        assert_eq!(breakdown.effective_rate, dec!(0));
    }

    #[test]
    fn from_components_sums_total() {
        let breakdown = TaxBreakdown::from_components(
            dec!(50000),
            dec!(8666),
            dec!(15000),
            dec!(10500),
            round_whole,
        );

        assert_eq!(breakdown.total_tax, dec!(34166));
        assert_eq!(breakdown.net_income, dec!(15834));
        assert_eq!(breakdown.effective_rate, dec!(68.3));
    }

    #[test]
    fn from_components_zero_income_has_zero_rate() {
        let breakdown = TaxBreakdown::from_components(
            dec!(0),
            dec!(0),
            dec!(3600),
            dec!(0),
            round_whole,
        );

        assert_eq!(breakdown.total_tax, dec!(3600));
        assert_eq!(breakdown.net_income, dec!(-3600));
        assert_eq!(breakdown.effective_rate, dec!(0));
    }
}
