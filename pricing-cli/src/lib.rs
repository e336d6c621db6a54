pub mod request;

use anyhow::Context;
use pricing_core::PricingConfig;
use pricing_engine::{PriceCalculationResult, PriceCalculator};
use std::io::Read;
use std::path::Path;

pub use request::{DiscountRequest, QuoteRequest};

/// Log filter used when `RUST_LOG` is unset. Pipeline steps log at debug.
pub const DEFAULT_LOG_FILTER: &str = "price_quote=info,pricing_engine=debug";

/// Load pricing configuration from an explicit file, or the layered
/// `config/` directory plus `PRICING__*` environment when none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PricingConfig> {
    match path {
        Some(path) => PricingConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => PricingConfig::load().context("Failed to load layered config"),
    }
}

/// Read a quote request as JSON from a file, or stdin for `-` / no path.
pub fn read_request(path: Option<&Path>) -> anyhow::Result<QuoteRequest> {
    let raw = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    parse_request(&raw)
}

pub fn parse_request(raw: &str) -> anyhow::Result<QuoteRequest> {
    serde_json::from_str(raw).context("Malformed quote request")
}

/// Price one request with a calculator built from `config`.
pub fn quote(config: &PricingConfig, request: QuoteRequest) -> anyhow::Result<PriceCalculationResult> {
    let calculator = PriceCalculator::from_config(config).context("Invalid pricing configuration")?;
    let (product, discount, tax, shipping) = request.into_contexts();

    let result = calculator
        .try_calculate_price(&product, &discount, &tax, &shipping)
        .context("Quote request rejected")?;
    Ok(result)
}
