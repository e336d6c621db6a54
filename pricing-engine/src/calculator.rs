use pricing_catalog::{DiscountContext, Product, ShippingContext, TaxContext};
use pricing_core::{DiscountStacking, PricingConfig, PricingResult};
use pricing_discount::DiscountStrategy;
use pricing_shared::{clamp_discount, round_money};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::factory;
use crate::result::{Components, PriceCalculationResult};
use crate::shipping::ShippingCalculator;
use crate::tax::TaxCalculator;

/// Runs discounts, then tax, then shipping, and totals the result.
///
/// Holds only its injected strategies, so one instance can be shared across
/// threads and called concurrently.
#[derive(Debug, Clone)]
pub struct PriceCalculator {
    discounts: Vec<Arc<dyn DiscountStrategy>>,
    tax_calculator: Arc<dyn TaxCalculator>,
    shipping_calculator: Arc<dyn ShippingCalculator>,
    stacking: DiscountStacking,
}

impl PriceCalculator {
    pub fn new(
        discounts: Vec<Arc<dyn DiscountStrategy>>,
        tax_calculator: Arc<dyn TaxCalculator>,
        shipping_calculator: Arc<dyn ShippingCalculator>,
    ) -> Self {
        Self {
            discounts,
            tax_calculator,
            shipping_calculator,
            stacking: DiscountStacking::Independent,
        }
    }

    pub fn with_stacking(mut self, stacking: DiscountStacking) -> Self {
        self.stacking = stacking;
        self
    }

    /// Build every strategy named in the configuration, failing on the
    /// first invalid one.
    pub fn from_config(config: &PricingConfig) -> PricingResult<Self> {
        let discounts = config
            .discounts
            .iter()
            .map(factory::build_discount)
            .collect::<PricingResult<Vec<_>>>()?;
        let tax_calculator = factory::build_tax(&config.tax)?;
        let shipping_calculator = factory::build_shipping(&config.shipping)?;

        tracing::info!(
            discounts = discounts.len(),
            tax = %tax_calculator.name(),
            shipping = %shipping_calculator.name(),
            stacking = ?config.stacking,
            "Price calculator configured"
        );

        Ok(Self::new(discounts, tax_calculator, shipping_calculator).with_stacking(config.stacking))
    }

    pub fn stacking(&self) -> DiscountStacking {
        self.stacking
    }

    /// Validate the inputs, then price them.
    pub fn try_calculate_price(
        &self,
        product: &Product,
        discount_context: &DiscountContext,
        tax_context: &TaxContext,
        shipping_context: &ShippingContext,
    ) -> PricingResult<PriceCalculationResult> {
        product.validate()?;
        discount_context.validate()?;
        shipping_context.validate()?;
        Ok(self.calculate_price(product, discount_context, tax_context, shipping_context))
    }

    pub fn calculate_price(
        &self,
        product: &Product,
        discount_context: &DiscountContext,
        tax_context: &TaxContext,
        shipping_context: &ShippingContext,
    ) -> PriceCalculationResult {
        let original_price = round_money(product.price);
        let (total_discount, applied_discounts) =
            self.apply_discounts(original_price, discount_context);

        // Discounts can stack past the price; never tax a negative base
        let discount_amount = clamp_discount(round_money(total_discount), original_price);
        let price_after_discount = original_price - discount_amount;

        let tax_amount = round_money(
            self.tax_calculator
                .calculate_tax(price_after_discount, tax_context)
                .max(Decimal::ZERO),
        );
        let shipping_cost = round_money(
            self.shipping_calculator
                .calculate_shipping(shipping_context)
                .max(Decimal::ZERO),
        );

        let result = PriceCalculationResult::from_components(Components {
            original_price,
            discount_amount,
            price_after_discount,
            tax_amount,
            tax_name: self.tax_calculator.name(),
            shipping_cost,
            shipping_method: self.shipping_calculator.name(),
            estimated_delivery_days: self.shipping_calculator.estimated_delivery().num_days(),
            applied_discounts,
        });

        tracing::debug!(
            product = %product.name,
            user = ?discount_context.user_id,
            original = %result.original_price(),
            discount = %result.discount_amount(),
            tax = %result.tax_amount(),
            shipping = %result.shipping_cost(),
            total = %result.final_price(),
            applied = ?result.applied_discounts(),
            "Price calculated"
        );

        result
    }

    /// Total discount and the names of the leaf strategies that contributed,
    /// in evaluation order. Composites report their children, not themselves.
    fn apply_discounts(&self, original_price: Decimal, context: &DiscountContext) -> (Decimal, Vec<String>) {
        let mut total = Decimal::ZERO;
        let mut applied = Vec::new();

        for strategy in &self.discounts {
            if !strategy.is_applicable(context) {
                continue;
            }
            let base = match self.stacking {
                DiscountStacking::Independent => original_price,
                DiscountStacking::Sequential => (original_price - total).max(Decimal::ZERO),
            };
            let amount = clamp_discount(strategy.calculate_discount(base, context), base);

            tracing::trace!(strategy = %strategy.name(), base = %base, amount = %amount, "Discount evaluated");

            if round_money(amount) > Decimal::ZERO {
                total += amount;
                applied.extend(strategy.applied_names(base, context));
            }
        }

        (total, applied)
    }
}
