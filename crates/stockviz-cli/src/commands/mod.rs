mod batch;
mod health;
mod history;
mod quote;
mod search;
mod shell;
mod view;
mod watchlist;

use std::sync::Arc;

use serde_json::Value;
use stockviz_core::{ApiConfig, StockApi, Symbol, TimeRange};
use stockviz_store::{DuckDbStore, KeyValueStore, MemoryStore, WatchlistRepository};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced: a JSON document and its text rendering.
pub struct CommandResult {
    pub data: Value,
    pub text: String,
    pub success: bool,
    pub quiet: bool,
}

impl CommandResult {
    pub fn ok(data: Value, text: impl Into<String>) -> Self {
        Self {
            data,
            text: text.into(),
            success: true,
            quiet: false,
        }
    }

    /// Nothing left to print; the command wrote its own output.
    pub fn quiet() -> Self {
        Self {
            data: Value::Null,
            text: String::new(),
            success: true,
            quiet: true,
        }
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }
}

/// Shared handles for one invocation. The store is opened on first use so
/// commands that never touch the watchlist do not create the data directory.
pub struct Context {
    api: StockApi,
    ephemeral: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.api_url {
            Some(url) => ApiConfig::new(url)?,
            None => ApiConfig::from_env(),
        };
        tracing::debug!(base_url = config.base_url(), "using quote API");

        Ok(Self {
            api: StockApi::with_reqwest(config),
            ephemeral: cli.ephemeral,
        })
    }

    pub fn api(&self) -> &StockApi {
        &self.api
    }

    pub fn store(&self) -> Result<Arc<dyn KeyValueStore>, CliError> {
        let store: Arc<dyn KeyValueStore> = if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(DuckDbStore::open_default()?)
        };
        Ok(store)
    }

    pub fn watchlist(&self) -> Result<WatchlistRepository, CliError> {
        Ok(WatchlistRepository::new(self.store()?))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let context = Context::from_cli(cli)?;

    match &cli.command {
        Command::Quote(args) => quote::run(args, &context).await,
        Command::History(args) => history::run(args, &context).await,
        Command::Search(args) => search::run(args, &context).await,
        Command::Batch(args) => batch::run(args, &context).await,
        Command::Health => health::run(&context).await,
        Command::View(args) => view::run(args, &context).await,
        Command::Watchlist(args) => watchlist::run(args, &context),
        Command::Shell => shell::run(&context).await,
    }
}

fn parse_symbol(raw: &str) -> Result<Symbol, CliError> {
    Ok(Symbol::parse(raw)?)
}

fn parse_range(raw: &str) -> Result<TimeRange, CliError> {
    Ok(raw.parse::<TimeRange>()?)
}
