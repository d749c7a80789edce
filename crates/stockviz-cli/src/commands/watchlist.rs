use serde_json::json;
use stockviz_core::Symbol;
use stockviz_store::WatchlistRepository;

use crate::cli::{WatchlistArgs, WatchlistCommand};
use crate::error::CliError;

use super::{parse_symbol, CommandResult, Context};

pub fn run(args: &WatchlistArgs, context: &Context) -> Result<CommandResult, CliError> {
    let repository = context.watchlist()?;

    let result = match &args.command {
        WatchlistCommand::List => list(&repository),
        WatchlistCommand::Add(args) => {
            let symbol = parse_symbol(&args.symbol)?;
            let added = repository.add(&symbol);
            let text = if added {
                format!("added {symbol}")
            } else {
                format!("{symbol} is already in the watchlist")
            };
            membership(&symbol, added, &repository, text)
        }
        WatchlistCommand::Remove(args) => {
            let symbol = parse_symbol(&args.symbol)?;
            let removed = repository.remove(&symbol);
            let text = if removed {
                format!("removed {symbol}")
            } else {
                format!("{symbol} is not in the watchlist")
            };
            membership(&symbol, removed, &repository, text)
        }
        WatchlistCommand::Clear => {
            repository.clear();
            CommandResult::ok(json!({ "symbols": [] }), "watchlist cleared")
        }
        WatchlistCommand::Toggle(args) => {
            let symbol = parse_symbol(&args.symbol)?;
            let text = if repository.contains(&symbol) {
                repository.remove(&symbol);
                format!("removed {symbol}")
            } else {
                repository.add(&symbol);
                format!("added {symbol}")
            };
            membership(&symbol, true, &repository, text)
        }
    };

    Ok(result)
}

fn list(repository: &WatchlistRepository) -> CommandResult {
    let symbols = repository.list();
    let text = if symbols.is_empty() {
        String::from(stockviz_ui::page::EMPTY_WATCHLIST)
    } else {
        symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| format!("{:>2}. {symbol}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };

    CommandResult::ok(json!({ "symbols": symbols }), text)
}

fn membership(
    symbol: &Symbol,
    changed: bool,
    repository: &WatchlistRepository,
    text: String,
) -> CommandResult {
    CommandResult::ok(
        json!({
            "symbol": symbol,
            "changed": changed,
            "in_watchlist": repository.contains(symbol),
            "symbols": repository.list(),
        }),
        text,
    )
}
