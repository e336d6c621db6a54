use chrono::{DateTime, Utc};
use pricing_catalog::DiscountContext;
use pricing_core::{invalid_config, PricingResult};
use pricing_shared::{clamp_discount, percent_of};
use rust_decimal::Decimal;

use crate::{DiscountStrategy, ELEVATED_PRIORITY};

const STUDENT_PERCENT: i64 = 15;
const SENIOR_PERCENT: i64 = 20;
const VIP_PERCENT: i64 = 25;

/// Minimum age for the senior discount
pub const SENIOR_AGE: u32 = 65;

fn validate_percent(percent: Decimal) -> PricingResult<Decimal> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(invalid_config(format!(
            "Discount percent must be between 0 and 100, got {}",
            percent
        )));
    }
    Ok(percent)
}

/// `percent` of `price` when applicable, zero otherwise.
fn percentage_off(applicable: bool, price: Decimal, percent: Decimal) -> Decimal {
    if !applicable {
        return Decimal::ZERO;
    }
    clamp_discount(percent_of(price, percent), price)
}

/// 15% off for students
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentDiscount;

impl DiscountStrategy for StudentDiscount {
    fn name(&self) -> String {
        "Student Discount".to_string()
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.customer.is_student
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, Decimal::from(STUDENT_PERCENT))
    }
}

/// 20% off for customers aged 65 and over
#[derive(Debug, Clone, Copy, Default)]
pub struct SeniorDiscount;

impl DiscountStrategy for SeniorDiscount {
    fn name(&self) -> String {
        "Senior Discount".to_string()
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.customer.age.is_some_and(|age| age >= SENIOR_AGE)
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, Decimal::from(SENIOR_PERCENT))
    }
}

/// 25% off for VIP customers, evaluated ahead of the ordinary tier
#[derive(Debug, Clone, Copy, Default)]
pub struct VipDiscount;

impl DiscountStrategy for VipDiscount {
    fn name(&self) -> String {
        "VIP Discount".to_string()
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.customer.is_vip
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, Decimal::from(VIP_PERCENT))
    }

    fn priority(&self) -> i32 {
        ELEVATED_PRIORITY
    }
}

#[derive(Debug, Clone)]
pub struct BulkDiscount {
    min_quantity: u32,
    percent: Decimal,
}

impl BulkDiscount {
    pub fn new(min_quantity: u32, percent: Decimal) -> PricingResult<Self> {
        if min_quantity == 0 {
            return Err(invalid_config("Bulk discount minimum quantity must be at least 1"));
        }
        Ok(Self {
            min_quantity,
            percent: validate_percent(percent)?,
        })
    }
}

impl DiscountStrategy for BulkDiscount {
    fn name(&self) -> String {
        format!("Bulk Discount ({}+ items)", self.min_quantity)
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.quantity >= self.min_quantity
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, self.percent)
    }
}

/// Percentage off for purchases made strictly inside a sale window
#[derive(Debug, Clone)]
pub struct SeasonalDiscount {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    percent: Decimal,
    label: String,
}

impl SeasonalDiscount {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        percent: Decimal,
        label: impl Into<String>,
    ) -> PricingResult<Self> {
        if start >= end {
            return Err(invalid_config(format!(
                "Seasonal discount window is empty: {} is not before {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            percent: validate_percent(percent)?,
            label: label.into(),
        })
    }
}

impl DiscountStrategy for SeasonalDiscount {
    fn name(&self) -> String {
        format!("{} Discount", self.label)
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        // Both ends exclusive
        context.purchase_date > self.start && context.purchase_date < self.end
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, self.percent)
    }
}

/// Percentage off once the running cart total reaches a threshold
#[derive(Debug, Clone)]
pub struct CartTotalDiscount {
    min_total: Decimal,
    percent: Decimal,
}

impl CartTotalDiscount {
    pub fn new(min_total: Decimal, percent: Decimal) -> PricingResult<Self> {
        if min_total < Decimal::ZERO {
            return Err(invalid_config(format!(
                "Cart total threshold cannot be negative: {}",
                min_total
            )));
        }
        Ok(Self {
            min_total,
            percent: validate_percent(percent)?,
        })
    }
}

impl DiscountStrategy for CartTotalDiscount {
    fn name(&self) -> String {
        format!("Cart Discount (over {})", self.min_total)
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.cart_total >= self.min_total
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        percentage_off(self.is_applicable(context), price, self.percent)
    }
}

/// Flat amount off, never taking the price below zero
#[derive(Debug, Clone)]
pub struct FixedAmountDiscount {
    amount: Decimal,
    label: String,
}

impl FixedAmountDiscount {
    pub fn new(amount: Decimal, label: impl Into<String>) -> PricingResult<Self> {
        if amount < Decimal::ZERO {
            return Err(invalid_config(format!(
                "Fixed discount amount cannot be negative: {}",
                amount
            )));
        }
        Ok(Self {
            amount,
            label: label.into(),
        })
    }
}

impl DiscountStrategy for FixedAmountDiscount {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn is_applicable(&self, _context: &DiscountContext) -> bool {
        true
    }

    fn calculate_discount(&self, price: Decimal, _context: &DiscountContext) -> Decimal {
        clamp_discount(self.amount, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pricing_catalog::{CustomerProfile, Product};
    use pricing_core::PricingError;
    use rust_decimal_macros::dec;

    fn context() -> DiscountContext {
        DiscountContext::new(Product::new("Clean Architecture", dec!(100), "books").unwrap())
    }

    fn customer(is_student: bool, age: Option<u32>, is_vip: bool) -> CustomerProfile {
        CustomerProfile { is_student, age, is_vip }
    }

    #[test]
    fn test_student_discount() {
        let strategy = StudentDiscount;
        let student = context().with_customer(customer(true, None, false));

        assert!(strategy.is_applicable(&student));
        assert_eq!(strategy.calculate_discount(dec!(100), &student), dec!(15));
        assert_eq!(strategy.calculate_discount(dec!(100), &context()), Decimal::ZERO);
        assert_eq!(strategy.name(), "Student Discount");
    }

    #[test]
    fn test_senior_discount_age_boundary() {
        let strategy = SeniorDiscount;
        let at_65 = context().with_customer(customer(false, Some(65), false));
        let at_64 = context().with_customer(customer(false, Some(64), false));

        assert_eq!(strategy.calculate_discount(dec!(50), &at_65), dec!(10));
        assert!(!strategy.is_applicable(&at_64));
        assert!(!strategy.is_applicable(&context()));
    }

    #[test]
    fn test_vip_discount_has_elevated_priority() {
        let strategy = VipDiscount;
        let vip = context().with_customer(customer(false, None, true));

        assert_eq!(strategy.calculate_discount(dec!(100), &vip), dec!(25));
        assert_eq!(strategy.priority(), 2);
        assert_eq!(StudentDiscount.priority(), 1);
    }

    #[test]
    fn test_bulk_discount() {
        let strategy = BulkDiscount::new(10, dec!(10)).unwrap();

        assert!(!strategy.is_applicable(&context().with_quantity(9)));
        assert_eq!(
            strategy.calculate_discount(dec!(80), &context().with_quantity(10)),
            dec!(8)
        );
        assert_eq!(strategy.name(), "Bulk Discount (10+ items)");
    }

    #[test]
    fn test_bulk_discount_rejects_bad_config() {
        assert!(matches!(
            BulkDiscount::new(0, dec!(10)),
            Err(PricingError::InvalidConfiguration(_))
        ));
        assert!(BulkDiscount::new(5, dec!(101)).is_err());
        assert!(BulkDiscount::new(5, dec!(-1)).is_err());
    }

    #[test]
    fn test_seasonal_window_is_exclusive() {
        let start = Utc::now();
        let end = start + Duration::days(7);
        let strategy = SeasonalDiscount::new(start, end, dec!(30), "Summer Sale").unwrap();

        let inside = context().with_purchase_date(start + Duration::days(1));
        assert_eq!(strategy.calculate_discount(dec!(100), &inside), dec!(30));

        assert!(!strategy.is_applicable(&context().with_purchase_date(start)));
        assert!(!strategy.is_applicable(&context().with_purchase_date(end)));
        assert_eq!(strategy.name(), "Summer Sale Discount");
    }

    #[test]
    fn test_seasonal_rejects_inverted_window() {
        let start = Utc::now();
        assert!(SeasonalDiscount::new(start, start, dec!(10), "Empty").is_err());
    }

    #[test]
    fn test_cart_total_discount() {
        let strategy = CartTotalDiscount::new(dec!(200), dec!(5)).unwrap();

        assert!(strategy.is_applicable(&context().with_cart_total(dec!(200))));
        assert!(!strategy.is_applicable(&context().with_cart_total(dec!(199.99))));
        assert_eq!(
            strategy.calculate_discount(dec!(100), &context().with_cart_total(dec!(250))),
            dec!(5)
        );
    }

    #[test]
    fn test_fixed_amount_never_exceeds_price() {
        let strategy = FixedAmountDiscount::new(dec!(20), "Welcome Coupon").unwrap();

        assert_eq!(strategy.calculate_discount(dec!(100), &context()), dec!(20));
        assert_eq!(strategy.calculate_discount(dec!(12.5), &context()), dec!(12.5));
        assert_eq!(strategy.name(), "Welcome Coupon");
        assert!(FixedAmountDiscount::new(dec!(-1), "Bad").is_err());
    }

    #[test]
    fn test_negative_price_yields_no_discount() {
        let student = context().with_customer(customer(true, None, false));
        assert_eq!(StudentDiscount.calculate_discount(dec!(-10), &student), Decimal::ZERO);
    }
}
