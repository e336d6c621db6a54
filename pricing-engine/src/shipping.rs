use chrono::Duration;
use pricing_catalog::ShippingContext;
use pricing_core::{config, invalid_config, PricingResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Prices delivery of an order.
pub trait ShippingCalculator: Send + Sync + fmt::Debug {
    fn calculate_shipping(&self, context: &ShippingContext) -> Decimal;

    fn name(&self) -> String;

    fn estimated_delivery(&self) -> Duration;
}

fn validate_rate(label: &str, rate: Decimal) -> PricingResult<Decimal> {
    if rate < Decimal::ZERO {
        return Err(invalid_config(format!("{} cannot be negative: {}", label, rate)));
    }
    Ok(rate)
}

/// Base plus per-weight charge, free once the order value reaches the
/// threshold.
#[derive(Debug, Clone)]
pub struct StandardShipping {
    base_rate: Decimal,
    per_weight_rate: Decimal,
    free_threshold: Decimal,
}

impl StandardShipping {
    pub fn new(
        base_rate: Decimal,
        per_weight_rate: Decimal,
        free_threshold: Decimal,
    ) -> PricingResult<Self> {
        Ok(Self {
            base_rate: validate_rate("Standard shipping base rate", base_rate)?,
            per_weight_rate: validate_rate("Standard shipping per-weight rate", per_weight_rate)?,
            free_threshold: validate_rate("Free shipping threshold", free_threshold)?,
        })
    }
}

impl Default for StandardShipping {
    fn default() -> Self {
        Self {
            base_rate: config::default_standard_base(),
            per_weight_rate: config::default_standard_per_weight(),
            free_threshold: config::default_free_threshold(),
        }
    }
}

impl ShippingCalculator for StandardShipping {
    fn calculate_shipping(&self, context: &ShippingContext) -> Decimal {
        if context.order_value >= self.free_threshold {
            return Decimal::ZERO;
        }
        self.base_rate + context.weight * self.per_weight_rate
    }

    fn name(&self) -> String {
        "Standard Shipping".to_string()
    }

    fn estimated_delivery(&self) -> Duration {
        Duration::days(5)
    }
}

/// Base plus per-weight charge, no free threshold
#[derive(Debug, Clone)]
pub struct ExpressShipping {
    base_rate: Decimal,
    per_weight_rate: Decimal,
}

impl ExpressShipping {
    pub fn new(base_rate: Decimal, per_weight_rate: Decimal) -> PricingResult<Self> {
        Ok(Self {
            base_rate: validate_rate("Express shipping base rate", base_rate)?,
            per_weight_rate: validate_rate("Express shipping per-weight rate", per_weight_rate)?,
        })
    }
}

impl Default for ExpressShipping {
    fn default() -> Self {
        Self {
            base_rate: config::default_express_base(),
            per_weight_rate: config::default_express_per_weight(),
        }
    }
}

impl ShippingCalculator for ExpressShipping {
    fn calculate_shipping(&self, context: &ShippingContext) -> Decimal {
        self.base_rate + context.weight * self.per_weight_rate
    }

    fn name(&self) -> String {
        "Express Shipping".to_string()
    }

    fn estimated_delivery(&self) -> Duration {
        Duration::days(2)
    }
}

/// Base rate scaled by a per-country multiplier (1 when unlisted).
///
/// Country codes are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct InternationalShipping {
    rates_by_country: HashMap<String, Decimal>,
    base_rate: Decimal,
}

impl InternationalShipping {
    pub fn new(rates_by_country: HashMap<String, Decimal>, base_rate: Decimal) -> PricingResult<Self> {
        let mut rates = HashMap::with_capacity(rates_by_country.len());
        for (country, multiplier) in rates_by_country {
            let multiplier =
                validate_rate(&format!("Shipping multiplier for {}", country), multiplier)?;
            rates.insert(country.trim().to_uppercase(), multiplier);
        }
        Ok(Self {
            rates_by_country: rates,
            base_rate: validate_rate("International shipping base rate", base_rate)?,
        })
    }

    fn multiplier_for(&self, country: &str) -> Decimal {
        self.rates_by_country
            .get(&country.trim().to_uppercase())
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

impl ShippingCalculator for InternationalShipping {
    fn calculate_shipping(&self, context: &ShippingContext) -> Decimal {
        self.base_rate * self.multiplier_for(&context.destination.country)
    }

    fn name(&self) -> String {
        "International Shipping".to_string()
    }

    fn estimated_delivery(&self) -> Duration {
        Duration::days(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_catalog::{Address, ShippingPriority};
    use rust_decimal_macros::dec;

    fn shipment(weight: Decimal, order_value: Decimal, country: &str) -> ShippingContext {
        ShippingContext::new(weight, order_value, Address::in_country(country))
    }

    #[test]
    fn test_standard_shipping() {
        let shipping = StandardShipping::default();

        assert_eq!(shipping.calculate_shipping(&shipment(dec!(5), dec!(50), "US")), dec!(15));
        assert_eq!(shipping.calculate_shipping(&shipment(dec!(5), dec!(150), "US")), Decimal::ZERO);
        // Threshold is inclusive
        assert_eq!(shipping.calculate_shipping(&shipment(dec!(1), dec!(100), "US")), Decimal::ZERO);
        assert_eq!(shipping.estimated_delivery(), Duration::days(5));
        assert_eq!(shipping.name(), "Standard Shipping");
    }

    #[test]
    fn test_express_shipping_has_no_free_threshold() {
        let shipping = ExpressShipping::default();
        let overnight = shipment(dec!(2), dec!(500), "US").with_priority(ShippingPriority::Overnight);

        assert_eq!(shipping.calculate_shipping(&overnight), dec!(25));
        assert_eq!(shipping.estimated_delivery(), Duration::days(2));
    }

    #[test]
    fn test_international_multipliers() {
        let rates = HashMap::from([("de".to_string(), dec!(1.5)), ("JP".to_string(), dec!(2))]);
        let shipping = InternationalShipping::new(rates, dec!(25)).unwrap();

        assert_eq!(shipping.calculate_shipping(&shipment(dec!(3), dec!(10), "DE")), dec!(37.5));
        assert_eq!(shipping.calculate_shipping(&shipment(dec!(3), dec!(10), "jp")), dec!(50));
        assert_eq!(shipping.calculate_shipping(&shipment(dec!(3), dec!(10), "BR")), dec!(25));
        assert_eq!(shipping.estimated_delivery(), Duration::days(10));
    }

    #[test]
    fn test_negative_rates_rejected() {
        assert!(StandardShipping::new(dec!(-1), dec!(2), dec!(100)).is_err());
        assert!(ExpressShipping::new(dec!(15), dec!(-5)).is_err());
        let rates = HashMap::from([("FR".to_string(), dec!(-2))]);
        assert!(InternationalShipping::new(rates, dec!(25)).is_err());
    }
}
