//! # Auric Core
//!
//! Core contracts and domain types for the auric precious-metal valuation
//! toolkit.
//!
//! ## Overview
//!
//! This crate provides the foundational components for auric:
//!
//! - **Canonical domain models** for spot-market snapshots, tax estimates,
//!   and the fixed currency/country reference tables
//! - **Feed traits** for the spot-price and regional-tax collaborators
//! - **Adapters** for the goldapi.io and Gemini generateContent contracts
//! - **Valuation session** orchestrating concurrent reloads and derived values
//! - **Searchable select** state machine with outside-pointer dismissal
//! - **Response envelope** with metadata and structured errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Feed adapters (goldapi, Gemini) |
//! | [`dismiss`] | Scoped outside-pointer dismissal subscriptions |
//! | [`domain`] | Domain models (Metal, MarketData, TaxInfo, Valuation) |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`feed`] | Feed traits and request/response types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`registry`] | Feed set construction from environment/config |
//! | [`select`] | Searchable dropdown state machine |
//! | [`session`] | Valuation session (selection state + reload cycle) |
//! | [`throttling`] | Rate limiting support |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use auric_core::{FeedSetBuilder, Metal, ValuationSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let feeds = FeedSetBuilder::new().with_real_clients().build();
//!     let mut session = ValuationSession::new(feeds.price, feeds.tax);
//!
//!     session.set_metal(Metal::Gold);
//!     session.set_weight_grams(10.0);
//!     session.reload().await;
//!
//!     let valuation = session.valuation();
//!     println!("estimated total: {:.2}", valuation.final_value);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CLI / Dashboard │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ ValuationSession │────▶│ Valuation (pure) │
//! └────────┬─────────┘     └──────────────────┘
//!          │ tokio::join!
//!    ┌─────┴──────┐
//!    ▼            ▼
//! ┌────────┐ ┌─────────┐   ┌──────────────────┐
//! │ Price  │ │ Tax     │──▶│ HTTP Client      │
//! │ Feed   │ │ Feed    │   │ (reqwest/none)   │
//! └────────┘ └─────────┘   └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Price-feed failures are structured and never crash a reload cycle:
//!
//! ```rust
//! use auric_core::feed::{SourceError, SourceErrorKind};
//!
//! fn handle_error(error: SourceError) {
//!     match error.kind() {
//!         SourceErrorKind::RateLimited => {
//!             // Wait for the budget to refill
//!         }
//!         SourceErrorKind::Unavailable => {
//!             // Prior data is retained; retry manually
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! The tax collaborator is infallible at the type level: its adapters resolve
//! every failure to the zero-percentage fallback.
//!
//! ## Security
//!
//! - API keys are read from environment variables only (never logged)
//! - Input validation on all domain types

pub mod adapters;
pub mod dismiss;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod registry;
pub mod select;
pub mod session;
pub mod throttling;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{GeminiTaxFeed, GoldApiFeed};

// Dismissal subscriptions
pub use dismiss::{DismissBus, DismissGuard, Region};

// Domain models
pub use domain::{
    Country, Currency, MarketData, Metal, TaxInfo, UtcDateTime, Valuation, GRAMS_PER_TROY_OUNCE,
};

// Envelope types
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};

// Error types
pub use error::{CoreError, ValidationError};

// Feed traits and types
pub use feed::{
    FeedId, PriceFeed, SourceError, SourceErrorKind, SpotRequest, TaxFeed, TaxRequest,
};

// Feed set construction
pub use registry::{FeedSet, FeedSetBuilder};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Searchable select
pub use select::{filter_options, SearchableSelect, SelectOption};

// Valuation session
pub use session::{ReloadOutcome, ReloadTicket, ValuationSession};

// Throttling
pub use throttling::RequestBudget;
