use chrono::{Duration, TimeZone, Utc};
use pricing_catalog::{CustomerProfile, DiscountContext, Product};
use pricing_discount::{
    BulkDiscount, CartTotalDiscount, CompositeDiscount, DiscountStrategy, FixedAmountDiscount,
    SeasonalDiscount, SeniorDiscount, StudentDiscount, VipDiscount,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn all_strategies() -> Vec<Arc<dyn DiscountStrategy>> {
    let sale_start = Utc.with_ymd_and_hms(2026, 11, 20, 0, 0, 0).unwrap();
    let leaves: Vec<Arc<dyn DiscountStrategy>> = vec![
        Arc::new(StudentDiscount),
        Arc::new(SeniorDiscount),
        Arc::new(VipDiscount),
        Arc::new(BulkDiscount::new(5, Decimal::new(10, 0)).unwrap()),
        Arc::new(
            SeasonalDiscount::new(
                sale_start,
                sale_start + Duration::days(10),
                Decimal::new(30, 0),
                "Black Friday",
            )
            .unwrap(),
        ),
        Arc::new(CartTotalDiscount::new(Decimal::new(200, 0), Decimal::new(5, 0)).unwrap()),
        Arc::new(FixedAmountDiscount::new(Decimal::new(25, 0), "Coupon").unwrap()),
    ];
    let mut strategies = leaves.clone();
    strategies.push(Arc::new(CompositeDiscount::new(leaves).unwrap()));
    strategies
}

fn arb_context() -> impl Strategy<Value = DiscountContext> {
    (
        any::<bool>(),
        proptest::option::of(0u32..100),
        any::<bool>(),
        1u32..20,
        0i64..50_000,
        0i64..30,
    )
        .prop_map(|(is_student, age, is_vip, quantity, cart_cents, day_offset)| {
            let product = Product::new("Head First Design Patterns", Decimal::new(4999, 2), "books")
                .unwrap();
            let purchase_date =
                Utc.with_ymd_and_hms(2026, 11, 15, 12, 0, 0).unwrap() + Duration::days(day_offset);
            DiscountContext::new(product)
                .with_customer(CustomerProfile { is_student, age, is_vip })
                .with_quantity(quantity)
                .with_cart_total(Decimal::new(cart_cents, 2))
                .with_purchase_date(purchase_date)
        })
}

proptest! {
    #[test]
    fn prop_discount_within_price(price_cents in 0i64..1_000_000, context in arb_context()) {
        let price = Decimal::new(price_cents, 2);
        for strategy in all_strategies() {
            let discount = strategy.calculate_discount(price, &context);
            prop_assert!(discount >= Decimal::ZERO, "{} went negative", strategy.name());
            prop_assert!(discount <= price, "{} exceeded the price", strategy.name());
        }
    }

    #[test]
    fn prop_inapplicable_means_zero(price_cents in 0i64..1_000_000, context in arb_context()) {
        let price = Decimal::new(price_cents, 2);
        for strategy in all_strategies() {
            if !strategy.is_applicable(&context) {
                prop_assert_eq!(strategy.calculate_discount(price, &context), Decimal::ZERO);
            }
        }
    }
}
