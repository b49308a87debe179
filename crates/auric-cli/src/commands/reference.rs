use serde_json::json;

use auric_core::domain::reference;
use auric_core::FeedId;

use crate::error::CliError;

use super::CommandResult;

pub fn regions() -> Result<CommandResult, CliError> {
    let data = json!({
        "countries": reference::COUNTRIES,
        "default": reference::default_country(),
    });
    Ok(CommandResult::ok(data, FeedId::ALL.to_vec()))
}

pub fn currencies() -> Result<CommandResult, CliError> {
    let data = json!({
        "currencies": reference::SUPPORTED_CURRENCIES,
        "default": reference::default_currency(),
    });
    Ok(CommandResult::ok(data, FeedId::ALL.to_vec()))
}
