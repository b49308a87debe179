use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::feed::{FeedFuture, FeedId, TaxFeed, TaxRequest};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::TaxInfo;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.0-flash";

/// AI-backed regional tax estimator over the generateContent contract.
///
/// The lookup asks for the combined import-duty plus GST/VAT percentage and
/// constrains the answer with a JSON response schema. Every failure path —
/// transport, upstream status, malformed payload — resolves to the 0%
/// fallback so callers never block on this feed.
#[derive(Clone)]
pub struct GeminiTaxFeed {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
    use_real_api: bool,
}

impl Default for GeminiTaxFeed {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            api_key: String::new(),
            timeout_ms: 8_000,
            use_real_api: false,
        }
    }
}

impl GeminiTaxFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        let is_real = !http_client.is_mock();
        Self {
            http_client,
            api_key: api_key.into(),
            use_real_api: is_real,
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn estimate_real(&self, req: &TaxRequest) -> TaxInfo {
        let prompt = format!(
            "What is the total estimated tax percentage (import duty plus GST/VAT) for buying \
             physical {} in {}? Provide only the number.",
            req.metal, req.country_name
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "percentage": { "type": "NUMBER" },
                        "country": { "type": "STRING" }
                    },
                    "required": ["percentage", "country"]
                }
            }
        });

        let request = HttpRequest::post(format!("{BASE_URL}/{MODEL}:generateContent"))
            .with_header("x-goog-api-key", self.api_key.clone())
            .with_json_body(body.to_string())
            .with_timeout_ms(self.timeout_ms);

        let response = match self.http_client.execute(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::warn!(
                    status = response.status,
                    country = %req.country_name,
                    "tax lookup rejected upstream; using 0% fallback"
                );
                return TaxInfo::fallback(&req.country_name);
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    country = %req.country_name,
                    "tax lookup transport failed; using 0% fallback"
                );
                return TaxInfo::fallback(&req.country_name);
            }
        };

        match parse_tax_response(&response.body) {
            Some(percentage) if percentage.is_finite() && percentage >= 0.0 => TaxInfo {
                percentage,
                country: req.country_name.clone(),
            },
            _ => {
                tracing::warn!(
                    country = %req.country_name,
                    "tax lookup produced no usable percentage; using 0% fallback"
                );
                TaxInfo::fallback(&req.country_name)
            }
        }
    }

    /// Deterministic per-country rate for offline mode.
    fn estimate_fake(&self, req: &TaxRequest) -> TaxInfo {
        let seed = req
            .country_name
            .bytes()
            .fold(0_u64, |acc, byte| {
                acc.wrapping_mul(33).wrapping_add(u64::from(byte))
            });
        TaxInfo {
            percentage: (seed % 240) as f64 / 10.0,
            country: req.country_name.clone(),
        }
    }
}

impl TaxFeed for GeminiTaxFeed {
    fn id(&self) -> FeedId {
        FeedId::Gemini
    }

    fn estimate<'a>(&'a self, req: TaxRequest) -> FeedFuture<'a, TaxInfo> {
        Box::pin(async move {
            if self.use_real_api {
                self.estimate_real(&req).await
            } else {
                self.estimate_fake(&req)
            }
        })
    }
}

fn parse_tax_response(body: &str) -> Option<f64> {
    let response: GenerateContentResponse = serde_json::from_str(body).ok()?;
    let text = response
        .candidates
        .first()?
        .content
        .parts
        .first()?
        .text
        .as_str();

    let payload: TaxPayload = serde_json::from_str(text).ok()?;
    Some(payload.percentage)
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct TaxPayload {
    percentage: f64,
}
