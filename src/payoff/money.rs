//! Cent rounding shared by the simulator and aggregator
//!
//! All amounts are rounded half-up (away from zero) to two decimal places.
//! Balances are never negative, so half-up and away-from-zero coincide.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for monetary amounts
pub const CENT_DP: u32 = 2;

/// Zero with cent scale, so it renders as `0.00`
pub const ZERO_CENTS: Decimal = Decimal::from_parts(0, 0, 0, false, CENT_DP);

/// Round to cents, half-up, always carrying two decimal places
pub fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(CENT_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_DP);
    rounded
}

/// Interest charged for one month on `balance` at `monthly_rate`, in cents
///
/// Saturates instead of overflowing when a balance compounds for decades
/// with payments below the interest charge.
pub fn monthly_interest(balance: Decimal, monthly_rate: Decimal) -> Decimal {
    round_cents(balance.saturating_mul(monthly_rate))
}

/// Sum amounts starting from cent-scale zero, saturating at `Decimal::MAX`
pub fn sum_cents<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(ZERO_CENTS, |total, amount| total.saturating_add(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(1.015)), dec!(1.02));
        assert_eq!(round_cents(dec!(1.0049)), dec!(1.00));
        assert_eq!(round_cents(dec!(12)), dec!(12));
    }

    #[test]
    fn test_cent_scale() {
        assert_eq!(round_cents(dec!(50)).to_string(), "50.00");
        assert_eq!(round_cents(dec!(4.1666)).to_string(), "4.17");
        assert_eq!(ZERO_CENTS.to_string(), "0.00");
        assert_eq!(ZERO_CENTS, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_interest() {
        assert_eq!(monthly_interest(dec!(1200), dec!(0.01)), dec!(12.00));
        // 1000 * 20% / 12 = 16.666...
        assert_eq!(monthly_interest(dec!(1000), dec!(20) / dec!(1200)), dec!(16.67));
        // 500 * 10% / 12 = 4.1666...
        assert_eq!(monthly_interest(dec!(500), dec!(10) / dec!(1200)), dec!(4.17));
        assert_eq!(monthly_interest(dec!(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_sum_cents_saturates() {
        assert_eq!(sum_cents(vec![dec!(1.5), dec!(2.25)]), dec!(3.75));
        assert_eq!(sum_cents(Vec::new()).to_string(), "0.00");
        assert_eq!(sum_cents(vec![Decimal::MAX, Decimal::MAX, dec!(1)]), Decimal::MAX);
    }
}
