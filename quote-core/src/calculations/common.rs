//! Common utility functions for price calculations.
//!
//! Quote amounts are whole Chilean pesos: CLP has no fractional sub-unit in
//! this domain, so every monetary figure is rounded to an integer amount.

use rust_decimal::Decimal;

/// Rounds a monetary value to a whole CLP amount using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, following standard
/// financial rounding conventions.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.4)), dec!(123));
/// assert_eq!(round_half_up(dec!(123.5)), dec!(124));
/// assert_eq!(round_half_up(dec!(-123.5)), dec!(-124)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a display percentage to two decimal places, half-up.
///
/// Percentages are ratios shown on the cycle comparison, not currency, so
/// they keep two places instead of being truncated to whole units.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(152000.4));

        assert_eq!(result, dec!(152000));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(152000.5));

        assert_eq!(result, dec!(152001));
    }

    #[test]
    fn round_half_up_rounds_up_above_midpoint() {
        let result = round_half_up(dec!(152000.6));

        assert_eq!(result, dec!(152001));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-0.5));

        assert_eq!(result, dec!(-1)); // Away from zero
    }

    #[test]
    fn round_half_up_preserves_whole_amounts() {
        let result = round_half_up(dec!(300000));

        assert_eq!(result, dec!(300000));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // round_percent tests
    // =========================================================================

    #[test]
    fn round_percent_keeps_two_places() {
        let result = round_percent(dec!(16.80672268));

        assert_eq!(result, dec!(16.81));
    }

    #[test]
    fn round_percent_rounds_half_up() {
        let result = round_percent(dec!(3.125));

        assert_eq!(result, dec!(3.13));
    }
}
