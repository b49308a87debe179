//! Feed traits and request/response types.
//!
//! This module defines the two external-collaborator contracts the valuation
//! session depends on, along with validated request payloads and the
//! structured error used by the price side.
//!
//! # Contracts
//!
//! | Trait | Request | Response | Description |
//! |-------|---------|----------|-------------|
//! | [`PriceFeed`] | [`SpotRequest`] | `Result<MarketData, SourceError>` | Live spot price per troy ounce |
//! | [`TaxFeed`] | [`TaxRequest`] | [`TaxInfo`] | Estimated regional duty/VAT percentage |
//!
//! The tax contract is infallible at the type level: adapters resolve every
//! failure to the zero-percentage fallback so a valuation is never blocked on
//! the lookup.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::domain::validate_currency_code;
use crate::{Country, Currency, MarketData, Metal, TaxInfo};

/// Canonical feed identifiers used in metadata and envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedId {
    Goldapi,
    Gemini,
}

impl FeedId {
    pub const ALL: [Self; 2] = [Self::Goldapi, Self::Gemini];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goldapi => "goldapi",
            Self::Gemini => "gemini",
        }
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured feed error surfaced by the price side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "feed.unavailable",
            SourceErrorKind::RateLimited => "feed.rate_limited",
            SourceErrorKind::InvalidRequest => "feed.invalid_request",
            SourceErrorKind::Internal => "feed.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the spot-price endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotRequest {
    pub metal: Metal,
    pub currency_code: String,
}

impl SpotRequest {
    /// Validate a raw currency code supplied by the user.
    pub fn new(metal: Metal, currency_code: &str) -> Result<Self, SourceError> {
        let currency_code = validate_currency_code(currency_code)
            .map_err(|error| SourceError::invalid_request(error.to_string()))?;
        Ok(Self {
            metal,
            currency_code,
        })
    }

    /// Build a request from a reference-table currency, which is always valid.
    pub fn for_currency(metal: Metal, currency: &Currency) -> Self {
        Self {
            metal,
            currency_code: currency.code.to_owned(),
        }
    }
}

/// Request payload for the tax-estimate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxRequest {
    pub metal: Metal,
    pub country_name: String,
}

impl TaxRequest {
    /// Validate a raw country name supplied by the user.
    pub fn new(metal: Metal, country_name: &str) -> Result<Self, SourceError> {
        let trimmed = country_name.trim();
        if trimmed.is_empty() {
            return Err(SourceError::invalid_request(
                "tax request must name a country",
            ));
        }
        Ok(Self {
            metal,
            country_name: trimmed.to_owned(),
        })
    }

    /// Build a request from a reference-table country, which is always valid.
    pub fn for_country(metal: Metal, country: &Country) -> Self {
        Self {
            metal,
            country_name: country.name.to_owned(),
        }
    }
}

pub type FeedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Spot-price feed contract.
///
/// Implementations must be `Send + Sync`; the session shares them across
/// spawned reload tasks.
pub trait PriceFeed: Send + Sync {
    /// Returns the unique feed identifier.
    fn id(&self) -> FeedId;

    /// Fetches the current spot snapshot for a metal/currency pair.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the upstream is unreachable, rate
    /// limited, or answers with a malformed payload.
    fn spot<'a>(&'a self, req: SpotRequest) -> FeedFuture<'a, Result<MarketData, SourceError>>;
}

/// Regional tax-estimate contract.
///
/// Always succeeds at the type level; adapters degrade to
/// [`TaxInfo::fallback`] on any failure.
pub trait TaxFeed: Send + Sync {
    /// Returns the unique feed identifier.
    fn id(&self) -> FeedId;

    /// Estimates the combined duty/VAT percentage for a metal/country pair.
    fn estimate<'a>(&'a self, req: TaxRequest) -> FeedFuture<'a, TaxInfo>;
}
