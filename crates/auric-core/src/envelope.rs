use serde::Serialize;
use uuid::Uuid;

use crate::feed::{FeedId, SourceError};
use crate::{UtcDateTime, ValidationError};

/// Standard response envelope for machine-readable CLI output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    pub feed_chain: Vec<FeedId>,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(feed_chain: Vec<FeedId>, latency_ms: u64) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: UtcDateTime::now(),
            feed_chain,
            latency_ms,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().is_empty() {
            return Err(ValidationError::EmptyRequestId);
        }
        if self.feed_chain.is_empty() {
            return Err(ValidationError::EmptyFeedChain);
        }
        Ok(())
    }
}

/// Structured error entry carried alongside envelope data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FeedId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            code: code.into(),
            message: message.into(),
            source: None,
            retryable: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn from_source(feed: FeedId, error: &SourceError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
            source: Some(feed),
            retryable: Some(error.retryable()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_requires_a_feed_chain() {
        let err = EnvelopeMeta::new(Vec::new(), 0).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyFeedChain));
    }

    #[test]
    fn source_errors_map_code_and_retryability() {
        let source = SourceError::rate_limited("quota spent");
        let entry = EnvelopeError::from_source(FeedId::Goldapi, &source);

        assert_eq!(entry.code, "feed.rate_limited");
        assert_eq!(entry.source, Some(FeedId::Goldapi));
        assert_eq!(entry.retryable, Some(true));
    }

    #[test]
    fn blank_error_entries_are_rejected() {
        let err = EnvelopeError::new("", "message").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyErrorCode));
    }
}
