use std::time::Instant;

use serde::Serialize;

use auric_core::{FeedId, FeedSet, TaxInfo, TaxRequest};

use crate::cli::TaxArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct TaxResponseData {
    tax_info: TaxInfo,
}

pub async fn run(args: &TaxArgs, feeds: &FeedSet) -> Result<CommandResult, CliError> {
    let request = TaxRequest::new(args.metal.into(), &args.country)
        .map_err(|error| CliError::Command(error.to_string()))?;

    let started = Instant::now();
    let tax_info = feeds.tax.estimate(request).await;
    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let mut result = CommandResult::ok(
        serde_json::to_value(TaxResponseData {
            tax_info: tax_info.clone(),
        })?,
        vec![FeedId::Gemini],
    )
    .with_latency(latency_ms);

    if tax_info.percentage == 0.0 {
        result = result.with_warning(
            "estimate is 0%; the lookup may have fallen back to its degraded answer",
        );
    }

    Ok(result)
}
