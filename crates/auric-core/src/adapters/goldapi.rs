use std::sync::Arc;

use serde::Deserialize;

use crate::feed::{FeedFuture, FeedId, PriceFeed, SourceError, SpotRequest};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, NoopHttpClient};
use crate::throttling::RequestBudget;
use crate::{MarketData, Metal, UtcDateTime};

const BASE_URL: &str = "https://www.goldapi.io/api";

/// Spot-price adapter for the goldapi.io contract.
///
/// Supports real API calls and a deterministic offline mode for tests. The
/// upstream quotes per troy ounce and echoes 24h change figures:
///
/// | Field | Meaning |
/// |-------|---------|
/// | `price` | Spot price per troy ounce |
/// | `ch` | 24h absolute change |
/// | `chp` | 24h percent change |
/// | `timestamp` | Unix seconds of the last tick |
#[derive(Clone)]
pub struct GoldApiFeed {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    budget: RequestBudget,
    timeout_ms: u64,
    use_real_api: bool,
}

impl Default for GoldApiFeed {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            auth: HttpAuth::None,
            budget: RequestBudget::per_minute(30),
            timeout_ms: 3_000,
            use_real_api: false,
        }
    }
}

impl GoldApiFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, access_token: impl Into<String>) -> Self {
        let is_real = !http_client.is_mock();
        Self {
            http_client,
            auth: HttpAuth::Header {
                name: String::from("x-access-token"),
                value: access_token.into(),
            },
            use_real_api: is_real,
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: RequestBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_real_spot(&self, req: &SpotRequest) -> Result<MarketData, SourceError> {
        if let Err(wait) = self.budget.acquire() {
            return Err(SourceError::rate_limited(format!(
                "goldapi request budget exhausted; retry in {}s",
                wait.as_secs().max(1)
            )));
        }

        let endpoint = format!(
            "{BASE_URL}/{}/{}",
            req.metal.feed_symbol(),
            urlencoding::encode(&req.currency_code)
        );

        let request = HttpRequest::get(endpoint)
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("goldapi transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("goldapi transport error: {}", error.message()))
            }
        })?;

        if response.status == 429 {
            return Err(SourceError::rate_limited(
                "goldapi answered 429 Too Many Requests",
            ));
        }

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "goldapi returned status {}",
                response.status
            )));
        }

        parse_spot_response(req, &response.body)
    }

    /// Deterministic data for offline mode, seeded by the request pair.
    async fn fetch_fake_spot(&self, req: &SpotRequest) -> Result<MarketData, SourceError> {
        let seed = pair_seed(req.metal, &req.currency_code);

        let price = match req.metal {
            Metal::Gold => 1_900.0 + (seed % 4_000) as f64 / 10.0,
            Metal::Silver => 22.0 + (seed % 120) as f64 / 10.0,
        };
        let change_24h = (seed % 210) as f64 / 10.0 - 10.0;
        let change_percent = change_24h / price * 100.0;

        MarketData::new(
            req.metal,
            price,
            change_24h,
            change_percent,
            UtcDateTime::now().clock_time(),
            &req.currency_code,
        )
        .map_err(|error| SourceError::internal(error.to_string()))
    }
}

impl PriceFeed for GoldApiFeed {
    fn id(&self) -> FeedId {
        FeedId::Goldapi
    }

    fn spot<'a>(&'a self, req: SpotRequest) -> FeedFuture<'a, Result<MarketData, SourceError>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_spot(&req).await
            } else {
                self.fetch_fake_spot(&req).await
            }
        })
    }
}

fn parse_spot_response(req: &SpotRequest, body: &str) -> Result<MarketData, SourceError> {
    let payload: GoldApiQuote = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("failed to parse goldapi response: {error}")))?;

    if let Some(message) = payload.error {
        return Err(SourceError::unavailable(format!(
            "goldapi API error: {message}"
        )));
    }

    let last_updated = UtcDateTime::from_unix_timestamp(payload.timestamp)
        .map(|ts| ts.clock_time())
        .unwrap_or_else(|_| UtcDateTime::now().clock_time());

    MarketData::new(
        req.metal,
        payload.price,
        payload.ch,
        payload.chp,
        last_updated,
        &req.currency_code,
    )
    .map_err(|error| SourceError::internal(error.to_string()))
}

fn pair_seed(metal: Metal, currency_code: &str) -> u64 {
    metal
        .feed_symbol()
        .bytes()
        .chain(currency_code.bytes())
        .fold(0_u64, |acc, byte| {
            acc.wrapping_mul(33).wrapping_add(u64::from(byte))
        })
}

#[derive(Debug, Clone, Deserialize)]
struct GoldApiQuote {
    #[serde(default)]
    price: f64,
    #[serde(default)]
    ch: f64,
    #[serde(default)]
    chp: f64,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct ScriptedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn with_body(body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::ok_json(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(HttpError::new("upstream timeout")),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn offline_mode_is_deterministic_per_pair() {
        let feed = GoldApiFeed::default();
        let request = SpotRequest::new(Metal::Gold, "USD").expect("valid request");

        let first = feed.spot(request.clone()).await.expect("spot data");
        let second = feed.spot(request).await.expect("spot data");

        assert_eq!(first.price, second.price);
        assert_eq!(first.metal_code, "XAU");
        assert!(first.price > 0.0);
    }

    #[tokio::test]
    async fn real_mode_targets_the_symbol_endpoint_with_token() {
        let client = Arc::new(ScriptedHttpClient::with_body(
            r#"{"price": 2012.5, "ch": 4.2, "chp": 0.21, "timestamp": 1700000000}"#,
        ));
        let feed = GoldApiFeed::with_http_client(client.clone(), "token-abc");
        let request = SpotRequest::new(Metal::Silver, "EUR").expect("valid request");

        let data = feed.spot(request).await.expect("spot data");
        assert_eq!(data.price, 2012.5);
        assert_eq!(data.currency, "EUR");

        let recorded = client.recorded();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].url.ends_with("/XAG/EUR"));
        assert_eq!(
            recorded[0].headers.get("x-access-token").map(String::as_str),
            Some("token-abc")
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_unavailable() {
        let client = Arc::new(ScriptedHttpClient::failing());
        let feed = GoldApiFeed::with_http_client(client, "token-abc");
        let request = SpotRequest::new(Metal::Gold, "USD").expect("valid request");

        let error = feed.spot(request).await.expect_err("must fail");
        assert_eq!(error.code(), "feed.unavailable");
    }

    #[tokio::test]
    async fn upstream_error_body_is_reported() {
        let client = Arc::new(ScriptedHttpClient::with_body(
            r#"{"error": "invalid api key"}"#,
        ));
        let feed = GoldApiFeed::with_http_client(client, "bad-token");
        let request = SpotRequest::new(Metal::Gold, "USD").expect("valid request");

        let error = feed.spot(request).await.expect_err("must fail");
        assert!(error.message().contains("invalid api key"));
    }
}
