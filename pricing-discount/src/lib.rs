//! Discount strategies.
//!
//! Each strategy decides whether it applies to a [`DiscountContext`] and how
//! much it takes off a given price. [`CompositeDiscount`] chains several of
//! them by priority against a shrinking remaining price.

pub mod strategies;
pub mod composite;

use pricing_catalog::DiscountContext;
use rust_decimal::Decimal;
use std::fmt;

pub use composite::CompositeDiscount;
pub use strategies::{
    BulkDiscount, CartTotalDiscount, FixedAmountDiscount, SeasonalDiscount, SeniorDiscount,
    StudentDiscount, VipDiscount,
};

/// Priority of ordinary strategies
pub const DEFAULT_PRIORITY: i32 = 1;
/// Priority of strategies that should run ahead of the ordinary tier
pub const ELEVATED_PRIORITY: i32 = 2;
/// Priority of composites, so nested composites run before flat strategies
pub const COMPOSITE_PRIORITY: i32 = 3;

/// A pluggable discount rule.
///
/// Implementations must return exactly zero when not applicable, and never
/// more than the price they are given.
pub trait DiscountStrategy: Send + Sync + fmt::Debug {
    /// Display name recorded in the price breakdown
    fn name(&self) -> String;

    fn is_applicable(&self, context: &DiscountContext) -> bool;

    /// Amount to take off `price`, within `[0, price]`
    fn calculate_discount(&self, price: Decimal, context: &DiscountContext) -> Decimal;

    /// Higher runs first when strategies are combined
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Names to record when this strategy takes something off `price`.
    /// Composites report the children that contributed instead of themselves.
    fn applied_names(&self, price: Decimal, context: &DiscountContext) -> Vec<String> {
        if self.calculate_discount(price, context) > Decimal::ZERO {
            vec![self.name()]
        } else {
            Vec::new()
        }
    }
}
