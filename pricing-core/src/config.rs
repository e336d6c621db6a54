use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;

use crate::PricingResult;

/// Pricing pipeline configuration: which discounts run, how tax and
/// shipping are computed, and how top-level discounts stack.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PricingConfig {
    #[serde(default)]
    pub discounts: Vec<DiscountConfig>,
    pub tax: TaxConfig,
    pub shipping: ShippingConfig,
    #[serde(default)]
    pub stacking: DiscountStacking,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            discounts: Vec::new(),
            tax: TaxConfig::Flat {
                rate: Decimal::new(8, 2),
            },
            shipping: ShippingConfig::Standard {
                base_rate: default_standard_base(),
                per_weight_rate: default_standard_per_weight(),
                free_threshold: default_free_threshold(),
            },
            stacking: DiscountStacking::Independent,
        }
    }
}

/// How the orchestrator combines its configured top-level discounts.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountStacking {
    /// Every strategy discounts off the original price; amounts are summed.
    #[default]
    Independent,
    /// Every strategy discounts off what the previous ones left over.
    Sequential,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountConfig {
    Student,
    Senior,
    Vip,
    Bulk {
        min_quantity: u32,
        percent: Decimal,
    },
    Seasonal {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        percent: Decimal,
        label: String,
    },
    CartTotal {
        min_total: Decimal,
        percent: Decimal,
    },
    FixedAmount {
        amount: Decimal,
        label: String,
    },
    Composite {
        #[serde(default)]
        name: Option<String>,
        children: Vec<DiscountConfig>,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxConfig {
    Flat {
        rate: Decimal,
    },
    Regional {
        rates: HashMap<String, Decimal>,
    },
    Category {
        #[serde(default)]
        rates: HashMap<String, Decimal>,
        #[serde(default = "default_category_rate")]
        default_rate: Decimal,
    },
    Progressive {
        brackets: Vec<TaxBracketConfig>,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaxBracketConfig {
    pub lower: Decimal,
    /// Missing means the bracket is open-ended.
    #[serde(default)]
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShippingConfig {
    Standard {
        #[serde(default = "default_standard_base")]
        base_rate: Decimal,
        #[serde(default = "default_standard_per_weight")]
        per_weight_rate: Decimal,
        #[serde(default = "default_free_threshold")]
        free_threshold: Decimal,
    },
    Express {
        #[serde(default = "default_express_base")]
        base_rate: Decimal,
        #[serde(default = "default_express_per_weight")]
        per_weight_rate: Decimal,
    },
    International {
        #[serde(default)]
        rates: HashMap<String, Decimal>,
        #[serde(default = "default_international_base")]
        base_rate: Decimal,
    },
}

pub fn default_category_rate() -> Decimal { Decimal::new(8, 2) }
pub fn default_standard_base() -> Decimal { Decimal::new(5, 0) }
pub fn default_standard_per_weight() -> Decimal { Decimal::new(2, 0) }
pub fn default_free_threshold() -> Decimal { Decimal::ONE_HUNDRED }
pub fn default_express_base() -> Decimal { Decimal::new(15, 0) }
pub fn default_express_per_weight() -> Decimal { Decimal::new(5, 0) }
pub fn default_international_base() -> Decimal { Decimal::new(25, 0) }

impl PricingConfig {
    /// Layered load: `config/default`, then `config/{RUN_MODE}` and
    /// `config/local` when present, then `PRICING__*` environment variables.
    pub fn load() -> PricingResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default"))
            .add_source(::config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(::config::File::with_name("config/local").required(false))
            // Eg. `PRICING__STACKING=sequential`
            .add_source(::config::Environment::with_prefix("PRICING").separator("__"))
            .build()?;

        tracing::debug!(run_mode = %run_mode, "Loaded layered pricing configuration");
        Ok(s.try_deserialize()?)
    }

    /// Load a single explicit file; the format follows the extension.
    pub fn from_path(path: impl AsRef<Path>) -> PricingResult<Self> {
        let path = path.as_ref();
        let s = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()?;

        tracing::debug!(path = %path.display(), "Loaded pricing configuration file");
        Ok(s.try_deserialize()?)
    }
}
