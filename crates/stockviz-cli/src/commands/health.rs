use serde_json::json;

use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(context: &Context) -> Result<CommandResult, CliError> {
    let healthy = context.api().health_check().await;
    let text = if healthy { "ok" } else { "unavailable" };

    Ok(CommandResult::ok(
        json!({ "healthy": healthy, "base_url": context.api().config().base_url() }),
        text,
    )
    .with_success(healthy))
}
