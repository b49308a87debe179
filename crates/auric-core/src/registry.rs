use std::env;
use std::sync::Arc;

use crate::adapters::{GeminiTaxFeed, GoldApiFeed};
use crate::feed::{PriceFeed, TaxFeed};
use crate::http_client::ReqwestHttpClient;

/// The pair of feeds a valuation session depends on.
#[derive(Clone)]
pub struct FeedSet {
    pub price: Arc<dyn PriceFeed>,
    pub tax: Arc<dyn TaxFeed>,
}

/// Builder for creating a [`FeedSet`] with real HTTP clients.
///
/// Reads API keys from environment variables; a feed without a key falls back
/// to its deterministic offline mode so the rest of the system keeps working.
///
/// # Environment Variables
///
/// | Feed | Primary Env Var | Fallback Env Var |
/// |------|-----------------|------------------|
/// | goldapi | `AURIC_GOLDAPI_KEY` | `GOLDAPI_KEY` |
/// | gemini | `AURIC_GEMINI_API_KEY` | `GEMINI_API_KEY` |
///
/// # Example
///
/// ```rust,ignore
/// use auric_core::FeedSetBuilder;
///
/// // Build with real HTTP clients (reads from env vars)
/// let feeds = FeedSetBuilder::new().with_real_clients().build();
///
/// // Or explicitly use deterministic offline feeds
/// let offline = FeedSetBuilder::new().with_mock_mode().build();
/// ```
#[derive(Debug, Default)]
pub struct FeedSetBuilder {
    use_mock: bool,
    goldapi_key: Option<String>,
    gemini_key: Option<String>,
    timeout_ms: Option<u64>,
}

impl FeedSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both feeds use deterministic offline data; no network calls are made.
    pub fn with_mock_mode(mut self) -> Self {
        self.use_mock = true;
        self
    }

    /// Configure feeds to use real HTTP clients, reading keys from the
    /// environment.
    pub fn with_real_clients(mut self) -> Self {
        self.use_mock = false;
        self.goldapi_key = env::var("AURIC_GOLDAPI_KEY")
            .or_else(|_| env::var("GOLDAPI_KEY"))
            .ok();
        self.gemini_key = env::var("AURIC_GEMINI_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok();
        self
    }

    /// Manually set the goldapi access token.
    pub fn with_goldapi_key(mut self, key: impl Into<String>) -> Self {
        self.goldapi_key = Some(key.into());
        self
    }

    /// Manually set the Gemini API key.
    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_key = Some(key.into());
        self
    }

    /// Per-request timeout budget applied to both feeds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn build(self) -> FeedSet {
        if self.use_mock {
            return FeedSet {
                price: Arc::new(GoldApiFeed::default()),
                tax: Arc::new(GeminiTaxFeed::default()),
            };
        }

        let http_client = Arc::new(ReqwestHttpClient::new());

        let price: Arc<dyn PriceFeed> = match &self.goldapi_key {
            Some(key) => {
                let mut feed = GoldApiFeed::with_http_client(http_client.clone(), key.clone());
                if let Some(timeout_ms) = self.timeout_ms {
                    feed = feed.with_timeout_ms(timeout_ms);
                }
                Arc::new(feed)
            }
            // No key available: deterministic offline data for this feed only.
            None => Arc::new(GoldApiFeed::default()),
        };

        let tax: Arc<dyn TaxFeed> = match &self.gemini_key {
            Some(key) => {
                let mut feed = GeminiTaxFeed::with_http_client(http_client, key.clone());
                if let Some(timeout_ms) = self.timeout_ms {
                    feed = feed.with_timeout_ms(timeout_ms);
                }
                Arc::new(feed)
            }
            None => Arc::new(GeminiTaxFeed::default()),
        };

        FeedSet { price, tax }
    }
}
