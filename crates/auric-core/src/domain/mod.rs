//! Domain models: metals, market snapshots, tax estimates, reference data,
//! and the derived valuation math.

mod metal;
mod models;
pub mod reference;
mod timestamp;
mod valuation;

pub use metal::Metal;
pub use models::{validate_currency_code, MarketData, TaxInfo};
pub use reference::{Country, Currency};
pub use timestamp::UtcDateTime;
pub use valuation::{Valuation, GRAMS_PER_TROY_OUNCE};
