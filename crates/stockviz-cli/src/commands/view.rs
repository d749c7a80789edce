use stockviz_ui::{render_page, PageController};

use crate::cli::RangeArgs;
use crate::error::CliError;

use super::{parse_range, parse_symbol, CommandResult, Context};

/// Mount the page, select `symbol` and render the result once.
pub async fn run(args: &RangeArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = parse_symbol(&args.symbol)?;
    let range = parse_range(&args.range)?;

    let mut page = PageController::new(context.api().clone(), context.watchlist()?).with_range(range);
    page.load_watchlist().await;
    page.select_symbol(symbol).await;

    let state = page.state();
    Ok(CommandResult::ok(serde_json::to_value(state)?, render_page(state, None))
        .with_success(state.error.is_none()))
}
