use pricing_catalog::DiscountContext;
use pricing_core::{invalid_config, PricingResult};
use pricing_shared::clamp_discount;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::sync::Arc;

use crate::{DiscountStrategy, COMPOSITE_PRIORITY};

const DEFAULT_NAME: &str = "Combined Discount";

/// Chains child strategies by priority.
///
/// Children run highest priority first (ties keep their given order), and
/// each applicable child discounts whatever the previous ones left.
#[derive(Debug, Clone)]
pub struct CompositeDiscount {
    name: String,
    children: Vec<Arc<dyn DiscountStrategy>>,
}

impl CompositeDiscount {
    pub fn new(children: Vec<Arc<dyn DiscountStrategy>>) -> PricingResult<Self> {
        if children.is_empty() {
            return Err(invalid_config("Composite discount needs at least one child"));
        }
        let mut children = children;
        // Stable, so equal priorities keep insertion order
        children.sort_by_key(|c| Reverse(c.priority()));
        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            children,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Children in evaluation order
    pub fn children(&self) -> &[Arc<dyn DiscountStrategy>] {
        &self.children
    }

    /// Applicable children that took something off, with the remaining price
    /// each one saw and the amount it took.
    fn evaluate(&self, price: Decimal, context: &DiscountContext) -> Vec<(&dyn DiscountStrategy, Decimal, Decimal)> {
        let mut remaining = price;
        let mut applied = Vec::new();

        for child in &self.children {
            if !child.is_applicable(context) {
                continue;
            }
            let amount = clamp_discount(child.calculate_discount(remaining, context), remaining);
            tracing::trace!(
                composite = %self.name,
                child = %child.name(),
                remaining = %remaining,
                amount = %amount,
                "Composite child evaluated"
            );
            if amount > Decimal::ZERO {
                applied.push((child.as_ref(), remaining, amount));
                remaining -= amount;
            }
        }

        applied
    }
}

impl DiscountStrategy for CompositeDiscount {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_applicable(&self, context: &DiscountContext) -> bool {
        self.children.iter().any(|c| c.is_applicable(context))
    }

    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal {
        self.evaluate(price, context)
            .into_iter()
            .map(|(_, _, amount)| amount)
            .sum()
    }

    fn priority(&self) -> i32 {
        COMPOSITE_PRIORITY
    }

    /// Leaf names of the children that took something off `price`, in the
    /// order they ran. Nested composites are flattened.
    fn applied_names(&self, price: Decimal, context: &DiscountContext) -> Vec<String> {
        self.evaluate(price, context)
            .into_iter()
            .flat_map(|(child, remaining, _)| child.applied_names(remaining, context))
            .collect()
    }
}
