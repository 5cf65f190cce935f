use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding for monetary values (2 decimal places, half-up)
const MONEY_DECIMAL_PLACES: u32 = 2;

/// Today's date in the local timezone of the till.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Round a monetary value for display or persistence.
///
/// Only call this at the boundary; intermediate values stay unrounded.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(Decimal::new(10125, 3)), Decimal::new(1013, 2));
        assert_eq!(round_money(Decimal::new(-10125, 3)), Decimal::new(-1013, 2));
        assert_eq!(round_money(Decimal::new(2268, 1)), Decimal::new(22680, 2));
    }
}
