//! Page state and the actions that drive it.
//!
//! Every asynchronous action is split into three steps so an event loop can
//! run the network part as an independent task:
//!
//! 1. `begin_*` updates state synchronously and returns a ticket,
//! 2. the ticket's `fetch` performs the requests,
//! 3. `apply_*` folds the outcome back into state.
//!
//! Three generation counters tag the tickets: one for selections, one for
//! the history series (bumped by selections and range changes) and one for
//! watchlist batch fetches. On apply, a superseded ticket is discarded, so a
//! slow response can never overwrite the result of a newer action. A selection
//! that completes after a range change still lands its quote but leaves the
//! newer history in place.

use serde::Serialize;
use stockviz_core::{ApiError, HistoryData, Quote, StockApi, Symbol, TimeRange};
use stockviz_store::WatchlistRepository;
use tracing::{debug, warn};

const LOAD_FALLBACK: &str = "Failed to load data";
const HISTORY_FALLBACK: &str = "Failed to load history";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub selected_symbol: Option<Symbol>,
    pub quote: Option<Quote>,
    pub history: Option<HistoryData>,
    pub range: TimeRange,
    pub watchlist: Vec<Symbol>,
    pub watchlist_quotes: Vec<Quote>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    history_generation: u64,
    symbol: Symbol,
    range: TimeRange,
}

impl SelectionTicket {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Quote and history, requested together; the first failure wins.
    pub async fn fetch(&self, api: &StockApi) -> Result<(Quote, HistoryData), ApiError> {
        tokio::try_join!(
            api.get_quote(&self.symbol),
            api.get_history(&self.symbol, self.range),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTicket {
    generation: u64,
    symbol: Symbol,
    range: TimeRange,
}

impl RangeTicket {
    pub async fn fetch(&self, api: &StockApi) -> Result<HistoryData, ApiError> {
        api.get_history(&self.symbol, self.range).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistTicket {
    generation: u64,
    symbols: Vec<Symbol>,
}

impl WatchlistTicket {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub async fn fetch(&self, api: &StockApi) -> Result<Vec<Quote>, ApiError> {
        api.get_batch_quotes(&self.symbols).await
    }
}

pub struct PageController {
    api: StockApi,
    watchlist: WatchlistRepository,
    state: PageState,
    generation: u64,
    history_generation: u64,
    watchlist_generation: u64,
}

impl PageController {
    pub fn new(api: StockApi, watchlist: WatchlistRepository) -> Self {
        Self {
            api,
            watchlist,
            state: PageState::default(),
            generation: 0,
            history_generation: 0,
            watchlist_generation: 0,
        }
    }

    /// Start from `range` instead of the default one-month window.
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.state.range = range;
        self
    }

    pub fn api(&self) -> &StockApi {
        &self.api
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_in_watchlist(&self, symbol: &Symbol) -> bool {
        self.state.watchlist.contains(symbol)
    }

    /// Load the stored watchlist. Returns a batch ticket when it is non-empty.
    pub fn mount(&mut self) -> Option<WatchlistTicket> {
        self.state.watchlist = self.watchlist.list();
        if self.state.watchlist.is_empty() {
            return None;
        }
        Some(self.next_watchlist_ticket())
    }

    pub fn begin_select(&mut self, symbol: Symbol) -> SelectionTicket {
        self.generation += 1;
        self.history_generation += 1;
        self.state.selected_symbol = Some(symbol.clone());
        self.state.error = None;
        self.state.loading = true;

        SelectionTicket {
            generation: self.generation,
            history_generation: self.history_generation,
            symbol,
            range: self.state.range,
        }
    }

    /// Returns `false` when the ticket was superseded and nothing changed.
    pub fn apply_selection(
        &mut self,
        ticket: &SelectionTicket,
        outcome: Result<(Quote, HistoryData), ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(symbol = %ticket.symbol, "discarding stale selection");
            return false;
        }

        match outcome {
            Ok((quote, history)) => {
                self.state.quote = Some(quote);
                if ticket.history_generation == self.history_generation {
                    self.state.history = Some(history);
                }
            }
            Err(error) => {
                warn!(symbol = %ticket.symbol, error = %error, "failed to load symbol");
                self.state.error = Some(error_message(&error, LOAD_FALLBACK));
                self.state.quote = None;
                self.state.history = None;
            }
        }
        self.state.loading = false;
        true
    }

    /// Ignored (returns `None`) when no symbol is selected.
    pub fn begin_range_change(&mut self, range: TimeRange) -> Option<RangeTicket> {
        let symbol = self.state.selected_symbol.clone()?;
        self.history_generation += 1;
        self.state.range = range;

        Some(RangeTicket {
            generation: self.history_generation,
            symbol,
            range,
        })
    }

    pub fn apply_range_change(
        &mut self,
        ticket: &RangeTicket,
        outcome: Result<HistoryData, ApiError>,
    ) -> bool {
        if ticket.generation != self.history_generation {
            debug!(symbol = %ticket.symbol, range = %ticket.range, "discarding stale history");
            return false;
        }

        match outcome {
            Ok(history) => self.state.history = Some(history),
            Err(error) => {
                warn!(symbol = %ticket.symbol, range = %ticket.range, error = %error, "failed to load history");
                self.state.error = Some(error_message(&error, HISTORY_FALLBACK));
            }
        }
        true
    }

    /// Flip membership in the stored watchlist, then refresh the whole list.
    pub fn toggle_watchlist(&mut self, symbol: &Symbol) -> WatchlistTicket {
        if self.watchlist.contains(symbol) {
            self.watchlist.remove(symbol);
        } else {
            self.watchlist.add(symbol);
        }

        self.state.watchlist = self.watchlist.list();
        self.next_watchlist_ticket()
    }

    /// Batch failures are logged and leave the current quotes in place.
    pub fn apply_watchlist_quotes(
        &mut self,
        ticket: &WatchlistTicket,
        outcome: Result<Vec<Quote>, ApiError>,
    ) -> bool {
        if ticket.generation != self.watchlist_generation {
            debug!("discarding stale watchlist quotes");
            return false;
        }

        match outcome {
            Ok(quotes) => self.state.watchlist_quotes = quotes,
            Err(error) => {
                warn!(count = ticket.symbols.len(), error = %error, "failed to load watchlist quotes");
            }
        }
        true
    }

    pub async fn load_watchlist(&mut self) {
        if let Some(ticket) = self.mount() {
            let outcome = ticket.fetch(&self.api).await;
            self.apply_watchlist_quotes(&ticket, outcome);
        }
    }

    pub async fn select_symbol(&mut self, symbol: Symbol) {
        let ticket = self.begin_select(symbol);
        let outcome = ticket.fetch(&self.api).await;
        self.apply_selection(&ticket, outcome);
    }

    pub async fn change_range(&mut self, range: TimeRange) {
        if let Some(ticket) = self.begin_range_change(range) {
            let outcome = ticket.fetch(&self.api).await;
            self.apply_range_change(&ticket, outcome);
        }
    }

    pub async fn toggle_and_refresh(&mut self, symbol: &Symbol) {
        let ticket = self.toggle_watchlist(symbol);
        let outcome = ticket.fetch(&self.api).await;
        self.apply_watchlist_quotes(&ticket, outcome);
    }

    fn next_watchlist_ticket(&mut self) -> WatchlistTicket {
        self.watchlist_generation += 1;
        WatchlistTicket {
            generation: self.watchlist_generation,
            symbols: self.state.watchlist.clone(),
        }
    }
}

fn error_message(error: &ApiError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}
