pub mod amount;
pub mod units;

pub use amount::Amount;
