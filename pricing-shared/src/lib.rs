pub mod money;
pub mod pii;

pub use money::{clamp_discount, percent_of, round_money};
pub use pii::Masked;
