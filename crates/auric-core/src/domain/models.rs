use serde::{Deserialize, Serialize};

use crate::{Metal, ValidationError};

/// Canonical spot-market snapshot for one metal/currency pair.
///
/// Produced fresh on every successful price fetch and replaced wholesale,
/// never merged field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Spot price per troy ounce in `currency`.
    pub price: f64,
    /// Absolute price change over the last 24 hours.
    pub change_24h: f64,
    /// Percent price change over the last 24 hours.
    pub change_percent: f64,
    /// Human-readable last-updated label supplied by the feed layer.
    pub last_updated: String,
    /// Display currency the price is quoted in (uppercase ISO code).
    pub currency: String,
    /// Unit of mass the price refers to.
    pub unit: String,
    /// Feed ticker symbol, e.g. XAU.
    pub metal_code: String,
}

impl MarketData {
    pub fn new(
        metal: Metal,
        price: f64,
        change_24h: f64,
        change_percent: f64,
        last_updated: impl Into<String>,
        currency: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_finite("change_24h", change_24h)?;
        validate_finite("change_percent", change_percent)?;

        Ok(Self {
            price,
            change_24h,
            change_percent,
            last_updated: last_updated.into(),
            currency: validate_currency_code(currency.as_ref())?,
            unit: String::from("oz"),
            metal_code: metal.feed_symbol().to_owned(),
        })
    }
}

/// Estimated combined duty and sales-tax percentage for one metal/country pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInfo {
    /// Total surcharge percentage, e.g. 15 for 15%. May exceed 100.
    pub percentage: f64,
    pub country: String,
}

impl TaxInfo {
    pub fn new(percentage: f64, country: impl Into<String>) -> Result<Self, ValidationError> {
        validate_non_negative("percentage", percentage)?;

        Ok(Self {
            percentage,
            country: country.into(),
        })
    }

    /// The degraded zero-percentage answer used when the lookup is unavailable.
    pub fn fallback(country: impl Into<String>) -> Self {
        Self {
            percentage: 0.0,
            country: country.into(),
        }
    }
}

/// Validate and normalize currency to an uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
