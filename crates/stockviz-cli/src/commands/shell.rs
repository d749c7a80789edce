//! Interactive page driven by stdin lines.
//!
//! Plain text is typed into the search box; lines starting with `:` are
//! commands. Network work runs in spawned tasks whose completions come back
//! over a channel, so typing never waits on a fetch.

use stockviz_core::{ApiError, HistoryData, Quote, StockApi, Symbol, TimeRange};
use stockviz_ui::{
    render_page, CardAction, CardTarget, PageController, PageState, QuoteCard, RangeTicket,
    SearchBox, SelectionTicket, WatchlistTicket,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::error::CliError;

use super::{CommandResult, Context};

const HELP: &str = "\
text        search for a ticker or company
:pick N     open search result N
:open SYM   open a symbol directly
:range R    switch chart range (1D 1W 1M 3M 1Y)
:star       add or remove the open quote from the watchlist
:w N        open watchlist entry N
:wstar N    add or remove watchlist entry N without opening it
:focus      reopen the last search results
:close      close the search results
:help       show this help
:quit       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellInput {
    Query(String),
    Pick(usize),
    Open(String),
    Range(String),
    Star,
    Close,
    Focus,
    Watch(usize),
    WatchStar(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> ShellInput {
    let Some(command) = line.trim().strip_prefix(':') else {
        return ShellInput::Query(line.to_owned());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let argument = parts.next();

    match (name, argument) {
        ("pick", Some(value)) => position(value).map_or_else(
            || ShellInput::Unknown(line.trim().to_owned()),
            ShellInput::Pick,
        ),
        ("w", Some(value)) => position(value).map_or_else(
            || ShellInput::Unknown(line.trim().to_owned()),
            ShellInput::Watch,
        ),
        ("wstar", Some(value)) => position(value).map_or_else(
            || ShellInput::Unknown(line.trim().to_owned()),
            ShellInput::WatchStar,
        ),
        ("open", Some(value)) => ShellInput::Open(value.to_owned()),
        ("range", Some(value)) => ShellInput::Range(value.to_owned()),
        ("star", None) => ShellInput::Star,
        ("close", None) => ShellInput::Close,
        ("focus", None) => ShellInput::Focus,
        ("help", None) => ShellInput::Help,
        ("quit" | "q", None) => ShellInput::Quit,
        _ => ShellInput::Unknown(line.trim().to_owned()),
    }
}

/// 1-based display position to 0-based index.
fn position(value: &str) -> Option<usize> {
    value.parse::<usize>().ok()?.checked_sub(1)
}

/// Card an input line points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardRef {
    Open,
    Watchlist(usize),
}

fn click_card(state: &PageState, card: CardRef, target: CardTarget) -> Option<CardAction> {
    let quote = match card {
        CardRef::Open => state.quote.as_ref()?,
        CardRef::Watchlist(index) => state.watchlist_quotes.get(index)?,
    };
    let in_watchlist = state.watchlist.contains(&quote.symbol);
    Some(QuoteCard::new(quote, in_watchlist).click(target))
}

enum PageEvent {
    Selection(SelectionTicket, Result<(Quote, HistoryData), ApiError>),
    Range(RangeTicket, Result<HistoryData, ApiError>),
    Watchlist(WatchlistTicket, Result<Vec<Quote>, ApiError>),
}

struct Shell {
    api: StockApi,
    page: PageController,
    search: SearchBox,
    events: UnboundedSender<PageEvent>,
}

impl Shell {
    fn draw(&self, notice: Option<&str>) {
        println!("{}", render_page(self.page.state(), Some(&self.search.render())));
        if let Some(notice) = notice {
            println!("\n{notice}");
        }
        println!();
    }

    fn select(&mut self, symbol: Symbol) {
        let ticket = self.page.begin_select(symbol);
        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = ticket.fetch(&api).await;
            if events.send(PageEvent::Selection(ticket, outcome)).is_err() {
                tracing::debug!("shell closed; dropping select result");
            }
        });
    }

    fn change_range(&mut self, range: TimeRange) -> bool {
        let Some(ticket) = self.page.begin_range_change(range) else {
            return false;
        };
        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = ticket.fetch(&api).await;
            if events.send(PageEvent::Range(ticket, outcome)).is_err() {
                tracing::debug!("shell closed; dropping range result");
            }
        });
        true
    }

    fn refresh_watchlist(&self, ticket: WatchlistTicket) {
        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = ticket.fetch(&api).await;
            if events.send(PageEvent::Watchlist(ticket, outcome)).is_err() {
                tracing::debug!("shell closed; dropping watchlist result");
            }
        });
    }

    fn dispatch(&mut self, action: CardAction) {
        match action {
            CardAction::Select(symbol) => self.select(symbol),
            CardAction::ToggleWatchlist(symbol) => {
                let ticket = self.page.toggle_watchlist(&symbol);
                self.refresh_watchlist(ticket);
            }
        }
    }

    fn click(&mut self, card: CardRef, target: CardTarget, missing: &str) {
        match click_card(self.page.state(), card, target) {
            Some(action) => {
                self.dispatch(action);
                self.draw(None);
            }
            None => self.draw(Some(missing)),
        }
    }

    fn apply(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::Selection(ticket, outcome) => self.page.apply_selection(&ticket, outcome),
            PageEvent::Range(ticket, outcome) => self.page.apply_range_change(&ticket, outcome),
            PageEvent::Watchlist(ticket, outcome) => {
                self.page.apply_watchlist_quotes(&ticket, outcome)
            }
        }
    }

    /// Returns `false` when the shell should exit.
    fn handle(&mut self, input: ShellInput) -> bool {
        match input {
            ShellInput::Query(text) => {
                self.search.on_input(&text);
                self.draw(None);
            }
            ShellInput::Pick(index) => match self.search.select(index) {
                Some(symbol) => {
                    self.select(symbol);
                    self.draw(None);
                }
                None => self.draw(Some("no such search result")),
            },
            ShellInput::Open(raw) => match Symbol::parse(&raw) {
                Ok(symbol) => {
                    self.select(symbol);
                    self.draw(None);
                }
                Err(error) => self.draw(Some(&error.to_string())),
            },
            ShellInput::Range(raw) => match raw.parse::<TimeRange>() {
                Ok(range) => {
                    if self.change_range(range) {
                        self.draw(None);
                    } else {
                        self.draw(Some("open a symbol first"));
                    }
                }
                Err(error) => self.draw(Some(&error.to_string())),
            },
            ShellInput::Star => self.click(CardRef::Open, CardTarget::Star, "no quote is open"),
            ShellInput::Close => {
                self.search.on_outside_click();
                self.draw(None);
            }
            ShellInput::Focus => {
                self.search.on_focus();
                self.draw(None);
            }
            ShellInput::Watch(index) => self.click(
                CardRef::Watchlist(index),
                CardTarget::Body,
                "no such watchlist entry",
            ),
            ShellInput::WatchStar(index) => self.click(
                CardRef::Watchlist(index),
                CardTarget::Star,
                "no such watchlist entry",
            ),
            ShellInput::Help => println!("{HELP}\n"),
            ShellInput::Quit => return false,
            ShellInput::Unknown(line) => self.draw(Some(&format!("unknown command: {line} (try :help)"))),
        }
        true
    }
}

pub async fn run(context: &Context) -> Result<CommandResult, CliError> {
    let (search_tx, mut search_rx) = mpsc::unbounded_channel();
    let (page_tx, mut page_rx) = mpsc::unbounded_channel();

    let api = context.api().clone();
    let mut shell = Shell {
        page: PageController::new(api.clone(), context.watchlist()?),
        search: SearchBox::new(api.clone(), search_tx),
        events: page_tx,
        api,
    };

    if let Some(ticket) = shell.page.mount() {
        shell.refresh_watchlist(ticket);
    }
    shell.draw(Some("type :help for commands"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !shell.handle(parse_input(&line)) {
                    break;
                }
            }
            Some(event) = search_rx.recv() => {
                if shell.search.handle_event(event) {
                    shell.draw(None);
                }
            }
            Some(event) = page_rx.recv() => {
                if shell.apply(event) {
                    shell.draw(None);
                }
            }
        }
    }

    tracing::debug!("shell closed");
    Ok(CommandResult::quiet())
}
