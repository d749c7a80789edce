use stockviz_ui::QuoteCard;

use crate::cli::SymbolArgs;
use crate::error::CliError;

use super::{parse_symbol, CommandResult, Context};

pub async fn run(args: &SymbolArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = parse_symbol(&args.symbol)?;
    let quote = context.api().get_quote(&symbol).await?;

    let text = QuoteCard::new(&quote, false).render();
    Ok(CommandResult::ok(serde_json::to_value(&quote)?, text))
}
