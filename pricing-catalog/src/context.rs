use chrono::{DateTime, Utc};
use pricing_core::{PricingError, PricingResult};
use pricing_shared::Masked;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// What we know about the buyer. Discount strategies read these fields
/// instead of probing a free-form attribute map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerProfile {
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub is_vip: bool,
}

/// Facts a discount strategy consults for one pricing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountContext {
    pub product: Product,

    #[serde(default)]
    pub user_id: Option<Masked<String>>,

    #[serde(default = "Utc::now")]
    pub purchase_date: DateTime<Utc>,

    /// Units being bought, at least 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Running cart total the product is added to
    #[serde(default)]
    pub cart_total: Decimal,

    #[serde(default)]
    pub customer: CustomerProfile,

    /// Caller-supplied extras; not read by the built-in strategies
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn default_quantity() -> u32 {
    1
}

fn empty_metadata() -> serde_json::Value {
    serde_json::json!({})
}

impl DiscountContext {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            user_id: None,
            purchase_date: Utc::now(),
            quantity: 1,
            cart_total: Decimal::ZERO,
            customer: CustomerProfile::default(),
            metadata: empty_metadata(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(Masked(user_id.into()));
        self
    }

    pub fn with_customer(mut self, customer: CustomerProfile) -> Self {
        self.customer = customer;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_cart_total(mut self, cart_total: Decimal) -> Self {
        self.cart_total = cart_total;
        self
    }

    pub fn with_purchase_date(mut self, purchase_date: DateTime<Utc>) -> Self {
        self.purchase_date = purchase_date;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn validate(&self) -> PricingResult<()> {
        self.product.validate()?;
        if self.quantity == 0 {
            return Err(PricingError::InvalidContext(
                "Quantity must be at least 1".to_string(),
            ));
        }
        if self.cart_total < Decimal::ZERO {
            return Err(PricingError::InvalidContext(format!(
                "Cart total cannot be negative: {}",
                self.cart_total
            )));
        }
        Ok(())
    }
}

/// Facts a tax calculator consults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxContext {
    pub region: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

impl TaxContext {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            country: None,
            category: None,
            metadata: empty_metadata(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Address where only the country is known, which is all shipping reads.
    pub fn in_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }
}

/// Requested delivery tier. Carried for the caller; the calculators price
/// by their own method, not by this field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingPriority {
    #[default]
    Standard,
    Express,
    Overnight,
}

/// Facts a shipping calculator consults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingContext {
    pub weight: Decimal,
    pub order_value: Decimal,
    pub destination: Address,
    #[serde(default = "Utc::now")]
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: ShippingPriority,
}

impl ShippingContext {
    pub fn new(weight: Decimal, order_value: Decimal, destination: Address) -> Self {
        Self {
            weight,
            order_value,
            destination,
            order_date: Utc::now(),
            priority: ShippingPriority::Standard,
        }
    }

    pub fn with_priority(mut self, priority: ShippingPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> PricingResult<()> {
        if self.weight < Decimal::ZERO {
            return Err(PricingError::InvalidContext(format!(
                "Order weight cannot be negative: {}",
                self.weight
            )));
        }
        if self.order_value < Decimal::ZERO {
            return Err(PricingError::InvalidContext(format!(
                "Order value cannot be negative: {}",
                self.order_value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book() -> Product {
        Product::new("Refactoring", dec!(45), "books").unwrap()
    }

    #[test]
    fn test_discount_context_defaults() {
        let context = DiscountContext::new(book());
        assert_eq!(context.quantity, 1);
        assert_eq!(context.cart_total, Decimal::ZERO);
        assert_eq!(context.customer, CustomerProfile::default());
        assert!(context.user_id.is_none());
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let context = DiscountContext::new(book()).with_quantity(0);
        assert!(matches!(context.validate(), Err(PricingError::InvalidContext(_))));
    }

    #[test]
    fn test_negative_cart_total_rejected() {
        let context = DiscountContext::new(book()).with_cart_total(dec!(-0.01));
        assert!(context.validate().is_err());
    }

    #[test]
    fn test_user_id_is_masked_in_debug() {
        let context = DiscountContext::new(book()).with_user("alice@example.com");
        let rendered = format!("{:?}", context);
        assert!(!rendered.contains("alice@example.com"));
    }

    #[test]
    fn test_discount_context_from_json_uses_defaults() {
        let json = serde_json::json!({
            "product": {
                "id": "8c0b4a3e-4f5c-4b8e-9d3a-2f1e6a7b8c9d",
                "name": "Design Patterns",
                "price": "54.50",
                "category": "books"
            },
            "customer": { "is_student": true }
        });
        let context: DiscountContext = serde_json::from_value(json).unwrap();
        assert_eq!(context.quantity, 1);
        assert!(context.customer.is_student);
        assert_eq!(context.customer.age, None);
        assert_eq!(context.product.price, dec!(54.50));
    }

    #[test]
    fn test_shipping_context_validation() {
        let ok = ShippingContext::new(dec!(1), dec!(20), Address::in_country("US"));
        assert!(ok.validate().is_ok());

        let heavy = ShippingContext::new(dec!(-1), dec!(20), Address::in_country("US"));
        assert!(heavy.validate().is_err());
    }

    #[test]
    fn test_priority_serialization() {
        let json = serde_json::to_string(&ShippingPriority::Overnight).unwrap();
        assert_eq!(json, "\"OVERNIGHT\"");
    }
}
