//! Domain types.

mod currency;
mod date;
mod money;

pub use currency::Currency;
pub use date::Date;
pub use money::{CurrencyAmount, MultiCurrencyAmount};
