//! Shared stubs for the behavior suites: scripted transports and feeds that
//! never touch the network.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use auric_core::feed::{FeedFuture, FeedId, PriceFeed, SpotRequest, TaxFeed, TaxRequest};
use auric_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, MarketData, Metal, SourceError, TaxInfo,
};

/// Build a plain gold/USD market snapshot at the given spot price.
pub fn market_at(price: f64) -> MarketData {
    MarketData::new(Metal::Gold, price, 1.5, 0.07, "12:00:00 UTC", "USD")
        .expect("valid market data")
}

/// Price feed that replays a scripted response and counts calls.
pub struct StubPriceFeed {
    response: Mutex<Result<MarketData, SourceError>>,
    pub calls: AtomicUsize,
}

impl StubPriceFeed {
    pub fn succeeding(data: MarketData) -> Self {
        Self {
            response: Mutex::new(Ok(data)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_response(&self, response: Result<MarketData, SourceError>) {
        *self.response.lock().expect("stub should not be poisoned") = response;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceFeed for StubPriceFeed {
    fn id(&self) -> FeedId {
        FeedId::Goldapi
    }

    fn spot<'a>(&'a self, _req: SpotRequest) -> FeedFuture<'a, Result<MarketData, SourceError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .response
            .lock()
            .expect("stub should not be poisoned")
            .clone();
        Box::pin(async move { response })
    }
}

/// Tax feed that answers a fixed percentage and counts calls.
pub struct StubTaxFeed {
    percentage: f64,
    pub calls: AtomicUsize,
}

impl StubTaxFeed {
    pub fn fixed(percentage: f64) -> Self {
        Self {
            percentage,
            calls: AtomicUsize::new(0),
        }
    }

    /// The degraded collaborator: always answers the 0% fallback.
    pub fn unavailable() -> Self {
        Self::fixed(0.0)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TaxFeed for StubTaxFeed {
    fn id(&self) -> FeedId {
        FeedId::Gemini
    }

    fn estimate<'a>(&'a self, req: TaxRequest) -> FeedFuture<'a, TaxInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tax = TaxInfo {
            percentage: self.percentage,
            country: req.country_name,
        };
        Box::pin(async move { tax })
    }
}

/// HTTP transport that replays one scripted response.
pub struct ScriptedHttpClient {
    response: Result<HttpResponse, HttpError>,
}

impl ScriptedHttpClient {
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(HttpResponse::ok_json(body)),
        }
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(HttpError::new(message)),
        }
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}
