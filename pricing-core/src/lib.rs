pub mod config;

pub use crate::config::{
    DiscountConfig, DiscountStacking, PricingConfig, ShippingConfig, TaxBracketConfig, TaxConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid pricing context: {0}")]
    InvalidContext(String),
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Shorthand for a configuration failure.
pub fn invalid_config(message: impl Into<String>) -> PricingError {
    PricingError::InvalidConfiguration(message.into())
}
