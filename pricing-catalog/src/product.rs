use pricing_core::{PricingError, PricingResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog entry being priced. The pipeline only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Free-form category tag, e.g. "books" or "electronics"
    pub category: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> PricingResult<Self> {
        let product = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            category: category.into(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Reject products that cannot be priced (negative unit price).
    pub fn validate(&self) -> PricingResult<()> {
        if self.price < Decimal::ZERO {
            return Err(PricingError::InvalidContext(format!(
                "Product '{}' has a negative price: {}",
                self.name, self.price
            )));
        }
        Ok(())
    }
}
