use std::time::Instant;

use serde::Serialize;

use auric_core::{EnvelopeError, FeedId, FeedSet, MarketData, SpotRequest};

use crate::cli::SpotArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SpotResponseData {
    market_data: Option<MarketData>,
}

pub async fn run(args: &SpotArgs, feeds: &FeedSet) -> Result<CommandResult, CliError> {
    let request = SpotRequest::new(args.metal.into(), &args.currency)
        .map_err(|error| CliError::Command(error.to_string()))?;

    let started = Instant::now();
    let outcome = feeds.price.spot(request).await;
    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let result = match outcome {
        Ok(market_data) => {
            let data = serde_json::to_value(SpotResponseData {
                market_data: Some(market_data),
            })?;
            CommandResult::ok(data, vec![FeedId::Goldapi]).with_latency(latency_ms)
        }
        Err(error) => {
            let data = serde_json::to_value(SpotResponseData { market_data: None })?;
            CommandResult::ok(data, vec![FeedId::Goldapi])
                .with_errors(vec![EnvelopeError::from_source(FeedId::Goldapi, &error)])
                .with_latency(latency_ms)
        }
    };

    Ok(result)
}
