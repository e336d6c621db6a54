//! Decimal helpers shared by every pricing stage.
//!
//! All amounts in the pipeline are `Decimal`, so percentage maths stays exact
//! (`15%` of `100` is `15`, not `15.000000000000002`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept in reported amounts.
pub const MONEY_SCALE: u32 = 2;

/// `amount * percent / 100`
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

/// Round to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Clamp a discount into `[0, price]`. A negative price allows no discount.
pub fn clamp_discount(discount: Decimal, price: Decimal) -> Decimal {
    let ceiling = price.max(Decimal::ZERO);
    discount.max(Decimal::ZERO).min(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of_is_exact() {
        assert_eq!(percent_of(dec!(100), dec!(15)), dec!(15));
        assert_eq!(percent_of(dec!(75), dec!(15)), dec!(11.25));
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_clamp_discount() {
        assert_eq!(clamp_discount(dec!(150), dec!(100)), dec!(100));
        assert_eq!(clamp_discount(dec!(-5), dec!(100)), dec!(0));
        assert_eq!(clamp_discount(dec!(5), dec!(-10)), dec!(0));
        assert_eq!(clamp_discount(dec!(25), dec!(100)), dec!(25));
    }
}
