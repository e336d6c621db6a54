pub mod tax;
pub mod shipping;
pub mod result;
pub mod calculator;
pub mod factory;

pub use tax::{CategoryRateTax, FlatRateTax, ProgressiveBracketTax, RegionalRateTax, TaxBracket, TaxCalculator};
pub use shipping::{ExpressShipping, InternationalShipping, ShippingCalculator, StandardShipping};
pub use result::PriceCalculationResult;
pub use calculator::PriceCalculator;
pub use pricing_core::DiscountStacking;
