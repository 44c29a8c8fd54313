//! Rounding helpers shared by the calculators.
//!
//! All rounding is half away from zero. For the non-negative amounts the
//! calculators work with this is the familiar "round half up".

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole currency units.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcmp_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(8665.49)), dec!(8665));
/// assert_eq!(round_whole(dec!(8665.5)), dec!(8666));
/// assert_eq!(round_whole(dec!(-3600.5)), dec!(-3601)); // Away from zero
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to one decimal place, used for percentages.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcmp_core::calculations::common::round_one_decimal;
///
/// assert_eq!(round_one_decimal(dec!(68.332)), dec!(68.3));
/// assert_eq!(round_one_decimal(dec!(69.15)), dec!(69.2));
/// ```
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100` to one decimal place, or zero when `whole` is not
/// positive.
///
/// A ratio too large for `Decimal` (a floor-sized `part` over a vanishingly
/// small `whole`) saturates to `Decimal::MAX`, or `Decimal::MIN` for a
/// negative `part`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcmp_core::calculations::common::percentage_of;
///
/// assert_eq!(percentage_of(dec!(34166), dec!(50000)), dec!(68.3));
/// assert_eq!(percentage_of(dec!(3600), dec!(0)), dec!(0));
/// ```
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(percentage) => round_one_decimal(percentage),
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        assert_eq!(round_whole(dec!(2365.4)), dec!(2365));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        assert_eq!(round_whole(dec!(2365.5)), dec!(2366));
    }

    #[test]
    fn round_whole_preserves_integers() {
        assert_eq!(round_whole(dec!(16000)), dec!(16000));
    }

    #[test]
    fn round_whole_handles_zero() {
        assert_eq!(round_whole(dec!(0.00)), dec!(0));
    }

    // =========================================================================
    // round_one_decimal tests
    // =========================================================================

    #[test]
    fn round_one_decimal_rounds_up_at_midpoint() {
        assert_eq!(round_one_decimal(dec!(65.75)), dec!(65.8));
    }

    #[test]
    fn round_one_decimal_rounds_down_below_midpoint() {
        assert_eq!(round_one_decimal(dec!(65.749)), dec!(65.7));
    }

    // =========================================================================
    // percentage_of tests
    // =========================================================================

    #[test]
    fn percentage_of_whole_income() {
        assert_eq!(percentage_of(dec!(65702), dec!(100000)), dec!(65.7));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(100), dec!(0)), dec!(0));
    }

    #[test]
    fn percentage_of_negative_whole_is_zero() {
        assert_eq!(percentage_of(dec!(100), dec!(-10)), dec!(0));
    }

    #[test]
    fn percentage_of_repeating_fraction() {
        // 1 / 3 = 33.333...%
        assert_eq!(percentage_of(dec!(1), dec!(3)), dec!(33.3));
    }

    #[test]
    fn percentage_of_saturates_when_ratio_overflows() {
        let tiny = Decimal::new(1, 25);

        assert_eq!(percentage_of(dec!(3600), tiny), Decimal::MAX);
        assert_eq!(percentage_of(dec!(-3600), tiny), Decimal::MIN);
    }

    #[test]
    fn percentage_of_saturates_when_scaling_overflows() {
        // The ratio itself fits; multiplying by 100 does not.
        assert_eq!(percentage_of(Decimal::MAX, dec!(1)), Decimal::MAX);
    }
}
