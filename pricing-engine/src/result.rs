use rust_decimal::Decimal;
use serde::Serialize;

/// Breakdown of one `calculate_price` call. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCalculationResult {
    original_price: Decimal,
    discount_amount: Decimal,
    price_after_discount: Decimal,
    tax_amount: Decimal,
    tax_name: String,
    shipping_cost: Decimal,
    shipping_method: String,
    estimated_delivery_days: i64,
    final_price: Decimal,
    /// In evaluation order
    applied_discounts: Vec<String>,
}

pub(crate) struct Components {
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub price_after_discount: Decimal,
    pub tax_amount: Decimal,
    pub tax_name: String,
    pub shipping_cost: Decimal,
    pub shipping_method: String,
    pub estimated_delivery_days: i64,
    pub applied_discounts: Vec<String>,
}

impl PriceCalculationResult {
    pub(crate) fn from_components(c: Components) -> Self {
        let final_price = (c.price_after_discount + c.tax_amount + c.shipping_cost).normalize();
        Self {
            original_price: c.original_price,
            discount_amount: c.discount_amount,
            price_after_discount: c.price_after_discount.normalize(),
            tax_amount: c.tax_amount,
            tax_name: c.tax_name,
            shipping_cost: c.shipping_cost,
            shipping_method: c.shipping_method,
            estimated_delivery_days: c.estimated_delivery_days,
            final_price,
            applied_discounts: c.applied_discounts,
        }
    }

    pub fn original_price(&self) -> Decimal {
        self.original_price
    }

    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    pub fn price_after_discount(&self) -> Decimal {
        self.price_after_discount
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    pub fn tax_name(&self) -> &str {
        &self.tax_name
    }

    pub fn shipping_cost(&self) -> Decimal {
        self.shipping_cost
    }

    pub fn shipping_method(&self) -> &str {
        &self.shipping_method
    }

    pub fn estimated_delivery_days(&self) -> i64 {
        self.estimated_delivery_days
    }

    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    pub fn applied_discounts(&self) -> &[String] {
        &self.applied_discounts
    }
}
