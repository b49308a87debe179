use thiserror::Error;

/// Validation and contract errors exposed by `auric-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("metal must be one of gold, silver: '{value}'")]
    InvalidMetal { value: String },

    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },
    #[error("country name cannot be empty")]
    EmptyCountry,
    #[error("unknown country '{value}', expected one of the supported market regions")]
    UnknownCountry { value: String },
    #[error("unknown display currency '{value}', expected one of the supported set")]
    UnknownCurrency { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("request_id cannot be empty")]
    EmptyRequestId,
    #[error("feed_chain must contain at least one feed")]
    EmptyFeedChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
