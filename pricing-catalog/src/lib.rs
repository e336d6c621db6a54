pub mod product;
pub mod context;

pub use product::Product;
pub use context::{
    Address, CustomerProfile, DiscountContext, ShippingContext, ShippingPriority, TaxContext,
};
