//! CLI argument definitions for stockviz.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Show the quote card for one symbol |
//! | `history` | Chart closing prices over a range |
//! | `search` | Look up symbols by ticker or company name |
//! | `batch` | One line per quote for several symbols |
//! | `health` | Check that the quote API is reachable |
//! | `view` | Render the full page for a symbol |
//! | `watchlist` | Manage the saved watchlist |
//! | `shell` | Interactive page driven by stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-url` | `$STOCKVIZ_API_URL` | Quote API base URL |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--ephemeral` | `false` | Keep the watchlist in memory only |
//! | `--verbose` | `false` | Debug logging on stderr |

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "stockviz",
    author,
    version,
    about = "Terminal stock quote viewer",
    long_about = "Look up quotes, chart price history and keep a watchlist of tickers, \
backed by the stockviz quote API.\n\
\n\
Use 'stockviz <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Quote API base URL, overriding STOCKVIZ_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Use an in-memory watchlist that is discarded on exit.
    #[arg(long, global = true, default_value_t = false)]
    pub ephemeral: bool,

    /// Log requests and state changes at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Table,
    /// Single JSON document.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the latest quote for a symbol.
    ///
    ///   stockviz quote AAPL
    Quote(SymbolArgs),

    /// Chart closing prices for a symbol.
    ///
    ///   stockviz history AAPL --range 3M
    History(RangeArgs),

    /// Search symbols by ticker or company name.
    ///
    ///   stockviz search apple
    Search(SearchArgs),

    /// Quotes for several symbols in one request.
    ///
    ///   stockviz batch AAPL MSFT GOOGL
    Batch(BatchArgs),

    /// Check whether the quote API is up (exit code 3 when it is not).
    Health,

    /// Render the full page: quote, chart and watchlist.
    ///
    ///   stockviz view TSLA --range 1D
    View(RangeArgs),

    /// Manage the saved watchlist.
    Watchlist(WatchlistArgs),

    /// Interactive page; type `:help` for commands.
    Shell,
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker symbol (e.g. AAPL).
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Ticker symbol (e.g. AAPL).
    pub symbol: String,

    /// History window: 1D, 1W, 1M, 3M or 1Y.
    #[arg(long, default_value = "1M")]
    pub range: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Ticker or company name fragment.
    pub keyword: String,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// One or more ticker symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct WatchlistArgs {
    #[command(subcommand)]
    pub command: WatchlistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WatchlistCommand {
    /// Print saved symbols in order.
    List,
    /// Append a symbol unless already present.
    Add(SymbolArgs),
    /// Remove a symbol.
    Remove(SymbolArgs),
    /// Forget every saved symbol.
    Clear,
    /// Add the symbol if absent, otherwise remove it.
    Toggle(SymbolArgs),
}
