mod reference;
mod spot;
mod tax;
mod value;

use auric_core::{Envelope, EnvelopeError, EnvelopeMeta, FeedId, FeedSet, FeedSetBuilder};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub feed_chain: Vec<FeedId>,
}

impl CommandResult {
    pub fn ok(data: Value, feed_chain: Vec<FeedId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            feed_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub fn build_feed_set(cli: &Cli) -> FeedSet {
    if cli.mock {
        FeedSetBuilder::new().with_mock_mode().build()
    } else {
        FeedSetBuilder::new()
            .with_real_clients()
            .with_timeout_ms(cli.timeout_ms)
            .build()
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let feeds = build_feed_set(cli);

    let command_result = match &cli.command {
        Command::Value(args) => value::run(args, &feeds).await?,
        Command::Spot(args) => spot::run(args, &feeds).await?,
        Command::Tax(args) => tax::run(args, &feeds).await?,
        Command::Regions => reference::regions()?,
        Command::Currencies => reference::currencies()?,
        Command::Watch(_) => {
            return Err(CliError::Command(String::from(
                "watch is interactive and produces no envelope",
            )))
        }
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        feed_chain,
    } = command_result;

    let mut meta = EnvelopeMeta::new(feed_chain, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
