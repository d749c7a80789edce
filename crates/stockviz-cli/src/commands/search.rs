use stockviz_core::SearchResult;
use stockviz_ui::NO_MATCHES_MESSAGE;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(args: &SearchArgs, context: &Context) -> Result<CommandResult, CliError> {
    let keyword = args.keyword.trim();
    if keyword.is_empty() {
        return Err(CliError::Command(String::from("search keyword must not be blank")));
    }

    let results = context.api().search_stocks(keyword).await?;
    Ok(CommandResult::ok(serde_json::to_value(&results)?, render(&results)))
}

fn render(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_MATCHES_MESSAGE.to_owned();
    }

    results
        .iter()
        .map(|result| format!("{:<8} {}", result.symbol.as_str(), result.name))
        .collect::<Vec<_>>()
        .join("\n")
}
