//! Feed adapters for the external price and tax collaborators.

mod gemini;
mod goldapi;

pub use gemini::GeminiTaxFeed;
pub use goldapi::GoldApiFeed;
