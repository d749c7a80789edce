use crate::chart::StockChart;
use crate::controller::PageState;
use crate::quote_card::QuoteCard;

pub const TITLE: &str = "Stock Visualizer";
pub const EMPTY_PROMPT: &str = "Search for a stock to get started";
pub const EMPTY_PROMPT_HINT: &str = "Type a ticker or company name above";
pub const EMPTY_WATCHLIST: &str = "No stocks yet";
pub const EMPTY_WATCHLIST_HINT: &str = "Star a quote to add it";
pub const LOADING: &str = "Loading...";

const RULE_WIDTH: usize = 72;

/// Compose the whole page from controller state.
///
/// `search` is the already-rendered search box, placed under the header.
pub fn render_page(state: &PageState, search: Option<&str>) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut sections = vec![format!("{TITLE}\n{rule}")];

    if let Some(search) = search {
        sections.push(search.to_owned());
    }

    if let Some(error) = &state.error {
        sections.push(format!("! {error}"));
    }

    if state.loading {
        sections.push(LOADING.to_owned());
    } else {
        sections.extend(render_main(state));
        sections.push(render_watchlist(state));
    }

    sections.join("\n\n")
}

fn render_main(state: &PageState) -> Vec<String> {
    let mut parts = Vec::new();

    if let Some(quote) = &state.quote {
        let in_watchlist = state.watchlist.contains(&quote.symbol);
        parts.push(QuoteCard::new(quote, in_watchlist).render());
    }

    if let Some(history) = &state.history {
        parts.push(StockChart::new(history, state.range).render());
    }

    if state.quote.is_none() && state.history.is_none() {
        parts.push(format!("{EMPTY_PROMPT}\n{EMPTY_PROMPT_HINT}"));
    }

    parts
}

/// Watchlist panel; rows are numbered for `:w N` in the shell.
pub fn render_watchlist(state: &PageState) -> String {
    let mut lines = vec![format!("My watchlist ({})", state.watchlist.len())];

    if state.watchlist_quotes.is_empty() {
        lines.push(format!("  {EMPTY_WATCHLIST}"));
        lines.push(format!("  {EMPTY_WATCHLIST_HINT}"));
    } else {
        for (index, quote) in state.watchlist_quotes.iter().enumerate() {
            let in_watchlist = state.watchlist.contains(&quote.symbol);
            lines.push(format!(
                "  {:>2}. {}",
                index + 1,
                QuoteCard::new(quote, in_watchlist).render_compact()
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockviz_core::{EpochMillis, HistoryData, Quote, Symbol, TimeRange};

    fn quote() -> Quote {
        Quote {
            symbol: Symbol::parse("MSFT").expect("symbol"),
            name: String::from("Microsoft Corporation"),
            current_price: 410.5,
            change: -2.0,
            change_percent: -0.48,
            open: 412.0,
            high: 413.0,
            low: 409.0,
            previous_close: 412.5,
            volume: None,
            timestamp: EpochMillis::new(1_700_000_000_000),
        }
    }

    #[test]
    fn empty_state_shows_prompt_and_empty_watchlist() {
        let page = render_page(&PageState::default(), None);

        assert!(page.contains(EMPTY_PROMPT));
        assert!(page.contains("My watchlist (0)"));
        assert!(page.contains(EMPTY_WATCHLIST));
    }

    #[test]
    fn loading_hides_main_content() {
        let state = PageState {
            loading: true,
            quote: Some(quote()),
            ..PageState::default()
        };
        let page = render_page(&state, Some("Search: ms"));

        assert!(page.contains(LOADING));
        assert!(page.contains("Search: ms"));
        assert!(!page.contains("$410.50"));
    }

    #[test]
    fn error_banner_and_chart_render_together() {
        let symbol = Symbol::parse("MSFT").expect("symbol");
        let state = PageState {
            selected_symbol: Some(symbol.clone()),
            quote: Some(quote()),
            history: Some(HistoryData::new(symbol.clone(), TimeRange::OneWeek, Vec::new())),
            range: TimeRange::OneWeek,
            watchlist: vec![symbol],
            watchlist_quotes: vec![quote()],
            error: Some(String::from("Network error")),
            ..PageState::default()
        };
        let page = render_page(&state, None);

        assert!(page.contains("! Network error"));
        assert!(page.contains("★"));
        assert!(page.contains("No historical data"));
        assert!(page.contains("My watchlist (1)"));
        assert!(page.contains(" 1. MSFT"));
        assert!(!page.contains(EMPTY_PROMPT));
    }
}
