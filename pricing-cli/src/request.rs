use chrono::{DateTime, Utc};
use pricing_catalog::{CustomerProfile, DiscountContext, Product, ShippingContext, TaxContext};
use pricing_shared::Masked;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One product to price, with everything the pipeline needs to know.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub product: Product,
    #[serde(default)]
    pub discount: DiscountRequest,
    pub tax: TaxContext,
    pub shipping: ShippingContext,
}

/// Discount facts; the product itself comes from [`QuoteRequest::product`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountRequest {
    #[serde(default)]
    pub user_id: Option<Masked<String>>,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub cart_total: Option<Decimal>,
    #[serde(default)]
    pub customer: CustomerProfile,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl QuoteRequest {
    pub fn into_contexts(self) -> (Product, DiscountContext, TaxContext, ShippingContext) {
        let d = self.discount;
        let mut discount = DiscountContext::new(self.product.clone()).with_customer(d.customer);
        discount.user_id = d.user_id;
        if let Some(purchase_date) = d.purchase_date {
            discount = discount.with_purchase_date(purchase_date);
        }
        if let Some(quantity) = d.quantity {
            discount = discount.with_quantity(quantity);
        }
        if let Some(cart_total) = d.cart_total {
            discount = discount.with_cart_total(cart_total);
        }
        if let Some(metadata) = d.metadata {
            discount = discount.with_metadata(metadata);
        }
        (self.product, discount, self.tax, self.shipping)
    }
}
