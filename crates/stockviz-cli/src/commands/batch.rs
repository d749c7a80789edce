use serde_json::json;
use stockviz_ui::QuoteCard;

use crate::cli::BatchArgs;
use crate::error::CliError;

use super::{parse_symbol, CommandResult, Context};

pub async fn run(args: &BatchArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| parse_symbol(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let quotes = context.api().get_batch_quotes(&symbols).await?;
    let text = if quotes.is_empty() {
        String::from("no quotes returned")
    } else {
        quotes
            .iter()
            .map(|quote| QuoteCard::new(quote, false).render_compact())
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(CommandResult::ok(json!({ "quotes": quotes }), text))
}
