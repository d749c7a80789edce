use stockviz_ui::StockChart;

use crate::cli::RangeArgs;
use crate::error::CliError;

use super::{parse_range, parse_symbol, CommandResult, Context};

pub async fn run(args: &RangeArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = parse_symbol(&args.symbol)?;
    let range = parse_range(&args.range)?;
    let history = context.api().get_history(&symbol, range).await?;

    let text = StockChart::new(&history, range).render();
    Ok(CommandResult::ok(serde_json::to_value(&history)?, text))
}
