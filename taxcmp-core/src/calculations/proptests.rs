//! Property-based tests for the calculators.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        FlatZeroCalculator, ProgressiveTaxCalculator, RegimeConfig, RoundingMode, TaxCalculator,
    };

    /// Gross incomes in cents, from zero to two million.
    fn income() -> impl Strategy<Value = Decimal> {
        (0i64..=200_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    /// Incomes below one cent, down to the smallest positive `Decimal`.
    fn sub_cent_income() -> impl Strategy<Value = Decimal> {
        (1i64..100, 2u32..=28).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    fn deferred() -> ProgressiveTaxCalculator {
        let mut config = RegimeConfig::spanish_autonomo();
        config.rounding = RoundingMode::Deferred;
        ProgressiveTaxCalculator::new(config).unwrap()
    }

    proptest! {
        #[test]
        fn total_is_sum_of_components(gross in income()) {
            for calculator in [ProgressiveTaxCalculator::default(), deferred()] {
                let b = calculator.compute(gross);
                prop_assert_eq!(b.total_tax, b.income_tax + b.social_security + b.consumption_tax);
            }
        }

        #[test]
        fn sub_cent_income_keeps_invariants(gross in sub_cent_income()) {
            for calculator in [ProgressiveTaxCalculator::default(), deferred()] {
                let b = calculator.compute(gross);
                prop_assert_eq!(b.total_tax, b.income_tax + b.social_security + b.consumption_tax);
                prop_assert!(b.effective_rate >= Decimal::ONE_HUNDRED);
            }
        }

        #[test]
        fn total_tax_is_monotonic(a in income(), b in income()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let calculator = ProgressiveTaxCalculator::default();

            prop_assert!(calculator.compute(low).total_tax <= calculator.compute(high).total_tax);
        }

        #[test]
        fn social_security_stays_within_floor_and_ceiling(gross in income()) {
            let b = ProgressiveTaxCalculator::default().compute(gross);

            prop_assert!(b.social_security >= Decimal::new(3_600, 0));
            prop_assert!(b.social_security <= Decimal::new(16_000, 0));
        }

        #[test]
        fn flat_zero_never_taxes(gross in income()) {
            let b = FlatZeroCalculator::default().compute(gross);

            prop_assert_eq!(b.total_tax, Decimal::ZERO);
            prop_assert_eq!(b.effective_rate, Decimal::ZERO);
        }

        #[test]
        fn bracket_walk_covers_taxable_income(taxable in income()) {
            let calculator = ProgressiveTaxCalculator::default();

            let covered: Decimal = calculator
                .bracket_walk(taxable)
                .iter()
                .map(|slice| slice.taxed_amount)
                .sum();

            prop_assert_eq!(covered, taxable);
        }
    }
}
