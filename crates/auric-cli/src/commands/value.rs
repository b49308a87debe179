use std::time::Instant;

use serde::Serialize;
use serde_json::json;

use auric_core::domain::reference;
use auric_core::{EnvelopeError, FeedId, FeedSet, MarketData, TaxInfo, Valuation, ValuationSession};

use crate::cli::ValueArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ValueResponseData {
    selection: serde_json::Value,
    market_data: Option<MarketData>,
    tax_info: Option<TaxInfo>,
    valuation: Valuation,
}

pub async fn run(args: &ValueArgs, feeds: &FeedSet) -> Result<CommandResult, CliError> {
    let country = reference::find_country(&args.country).ok_or_else(|| {
        CliError::Command(format!(
            "unknown country '{}'; run 'auric regions' for the supported set",
            args.country
        ))
    })?;
    let currency = reference::find_currency(&args.currency).ok_or_else(|| {
        CliError::Command(format!(
            "unknown currency '{}'; run 'auric currencies' for the supported set",
            args.currency
        ))
    })?;

    let mut session = ValuationSession::new(feeds.price.clone(), feeds.tax.clone());
    session.set_metal(args.metal.into());
    session.select_country(country.name);
    session.select_currency(currency.code);
    session.set_weight_grams(args.weight_grams);

    let started = Instant::now();
    session.reload().await;
    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    if let Some(error) = session.last_error() {
        errors.push(EnvelopeError::from_source(FeedId::Goldapi, error));
        warnings.push(String::from(
            "spot price unavailable; valuation degrades to zero",
        ));
    }

    let data = serde_json::to_value(ValueResponseData {
        selection: json!({
            "metal": session.metal(),
            "country": session.country(),
            "currency": session.currency(),
            "weight_grams": session.weight_grams(),
        }),
        market_data: session.market_data().cloned(),
        tax_info: session.tax_info().cloned(),
        valuation: session.valuation(),
    })?;

    let mut result = CommandResult::ok(data, vec![FeedId::Goldapi, FeedId::Gemini])
        .with_errors(errors)
        .with_latency(latency_ms);
    for warning in warnings {
        result = result.with_warning(warning);
    }
    Ok(result)
}
