//! Turns configuration into strategy objects.

use pricing_core::{DiscountConfig, PricingResult, ShippingConfig, TaxConfig};
use pricing_discount::{
    BulkDiscount, CartTotalDiscount, CompositeDiscount, DiscountStrategy, FixedAmountDiscount,
    SeasonalDiscount, SeniorDiscount, StudentDiscount, VipDiscount,
};
use std::sync::Arc;

use crate::shipping::{ExpressShipping, InternationalShipping, ShippingCalculator, StandardShipping};
use crate::tax::{
    CategoryRateTax, FlatRateTax, ProgressiveBracketTax, RegionalRateTax, TaxBracket, TaxCalculator,
};

pub fn build_discount(config: &DiscountConfig) -> PricingResult<Arc<dyn DiscountStrategy>> {
    let strategy: Arc<dyn DiscountStrategy> = match config {
        DiscountConfig::Student => Arc::new(StudentDiscount),
        DiscountConfig::Senior => Arc::new(SeniorDiscount),
        DiscountConfig::Vip => Arc::new(VipDiscount),
        DiscountConfig::Bulk { min_quantity, percent } => {
            Arc::new(BulkDiscount::new(*min_quantity, *percent)?)
        }
        DiscountConfig::Seasonal { start, end, percent, label } => {
            Arc::new(SeasonalDiscount::new(*start, *end, *percent, label.clone())?)
        }
        DiscountConfig::CartTotal { min_total, percent } => {
            Arc::new(CartTotalDiscount::new(*min_total, *percent)?)
        }
        DiscountConfig::FixedAmount { amount, label } => {
            Arc::new(FixedAmountDiscount::new(*amount, label.clone())?)
        }
        DiscountConfig::Composite { name, children } => {
            let children = children
                .iter()
                .map(build_discount)
                .collect::<PricingResult<Vec<_>>>()?;
            let composite = CompositeDiscount::new(children)?;
            match name {
                Some(name) => Arc::new(composite.with_name(name.clone())),
                None => Arc::new(composite),
            }
        }
    };
    Ok(strategy)
}

pub fn build_tax(config: &TaxConfig) -> PricingResult<Arc<dyn TaxCalculator>> {
    let calculator: Arc<dyn TaxCalculator> = match config {
        TaxConfig::Flat { rate } => Arc::new(FlatRateTax::new(*rate)?),
        TaxConfig::Regional { rates } => Arc::new(RegionalRateTax::new(rates.clone())?),
        TaxConfig::Category { rates, default_rate } => {
            Arc::new(CategoryRateTax::new(rates.clone(), *default_rate)?)
        }
        TaxConfig::Progressive { brackets } => {
            let brackets = brackets
                .iter()
                .map(|b| TaxBracket { lower: b.lower, upper: b.upper, rate: b.rate })
                .collect();
            Arc::new(ProgressiveBracketTax::new(brackets)?)
        }
    };
    Ok(calculator)
}

pub fn build_shipping(config: &ShippingConfig) -> PricingResult<Arc<dyn ShippingCalculator>> {
    let calculator: Arc<dyn ShippingCalculator> = match config {
        ShippingConfig::Standard { base_rate, per_weight_rate, free_threshold } => {
            Arc::new(StandardShipping::new(*base_rate, *per_weight_rate, *free_threshold)?)
        }
        ShippingConfig::Express { base_rate, per_weight_rate } => {
            Arc::new(ExpressShipping::new(*base_rate, *per_weight_rate)?)
        }
        ShippingConfig::International { rates, base_rate } => {
            Arc::new(InternationalShipping::new(rates.clone(), *base_rate)?)
        }
    };
    Ok(calculator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::{PricingError, TaxBracketConfig};
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_nested_composite() {
        let config = DiscountConfig::Composite {
            name: Some("Members".to_string()),
            children: vec![
                DiscountConfig::Student,
                DiscountConfig::Composite { name: None, children: vec![DiscountConfig::Vip] },
            ],
        };

        let strategy = build_discount(&config).unwrap();
        assert_eq!(strategy.name(), "Members");
        assert_eq!(strategy.priority(), 3);
    }

    #[test]
    fn test_invalid_discount_config_propagates() {
        let config = DiscountConfig::Composite {
            name: None,
            children: vec![DiscountConfig::Bulk { min_quantity: 3, percent: dec!(150) }],
        };
        assert!(matches!(
            build_discount(&config),
            Err(PricingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_build_progressive_tax() {
        let config = TaxConfig::Progressive {
            brackets: vec![
                TaxBracketConfig { lower: dec!(0), upper: Some(dec!(100)), rate: dec!(0.05) },
                TaxBracketConfig { lower: dec!(90), upper: None, rate: dec!(0.10) },
            ],
        };
        // Overlapping brackets fail fast
        assert!(build_tax(&config).is_err());
    }

    #[test]
    fn test_build_shipping() {
        let config = ShippingConfig::Express { base_rate: dec!(10), per_weight_rate: dec!(1) };
        let shipping = build_shipping(&config).unwrap();
        assert_eq!(shipping.name(), "Express Shipping");
    }
}
