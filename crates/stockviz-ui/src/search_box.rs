//! Debounced symbol search with a results dropdown.

use stockviz_core::{SearchResult, StockApi, Symbol};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::debounce::Debouncer;

pub const NO_MATCHES_MESSAGE: &str = "no matching stocks";

/// Progress of a debounced search, delivered back to the owning loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Started { seq: u64 },
    Completed { seq: u64, results: Result<Vec<SearchResult>, String> },
}

pub struct SearchBox {
    api: StockApi,
    events: UnboundedSender<SearchEvent>,
    debouncer: Debouncer,
    seq: u64,
    query: String,
    results: Vec<SearchResult>,
    loading: bool,
    show_results: bool,
}

impl SearchBox {
    pub fn new(api: StockApi, events: UnboundedSender<SearchEvent>) -> Self {
        Self::with_debouncer(api, events, Debouncer::default())
    }

    pub fn with_debouncer(
        api: StockApi,
        events: UnboundedSender<SearchEvent>,
        debouncer: Debouncer,
    ) -> Self {
        Self {
            api,
            events,
            debouncer,
            seq: 0,
            query: String::new(),
            results: Vec::new(),
            loading: false,
            show_results: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_open(&self) -> bool {
        self.show_results
    }

    /// Replace the query and restart the debounce timer.
    ///
    /// Blank input clears the results and cancels any pending search.
    pub fn on_input(&mut self, value: &str) {
        self.query = value.to_owned();
        self.seq += 1;

        if value.trim().is_empty() {
            self.debouncer.cancel();
            self.results.clear();
            self.loading = false;
            return;
        }

        let seq = self.seq;
        let keyword = value.to_owned();
        let api = self.api.clone();
        let events = self.events.clone();
        self.debouncer.schedule(async move {
            if events.send(SearchEvent::Started { seq }).is_err() {
                debug!(seq, "search box closed before search started");
                return;
            }
            let results = match api.search_stocks(&keyword).await {
                Ok(results) => Ok(results),
                Err(error) => {
                    warn!(keyword = %keyword, error = %error, "search failed");
                    Err(error.to_string())
                }
            };
            if events.send(SearchEvent::Completed { seq, results }).is_err() {
                debug!(seq, "search box closed; dropping results");
            }
        });
    }

    /// Apply a search event. Events from superseded queries are dropped.
    pub fn handle_event(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Started { seq } if seq == self.seq => {
                self.loading = true;
                true
            }
            SearchEvent::Completed { seq, results } if seq == self.seq => {
                self.loading = false;
                match results {
                    Ok(results) => {
                        self.results = results;
                        self.show_results = true;
                    }
                    Err(_) => self.results.clear(),
                }
                true
            }
            stale => {
                debug!(?stale, current = self.seq, "discarding stale search event");
                false
            }
        }
    }

    /// Re-open the dropdown when results are already present.
    pub fn on_focus(&mut self) {
        if !self.results.is_empty() {
            self.show_results = true;
        }
    }

    pub fn on_outside_click(&mut self) {
        self.show_results = false;
    }

    /// Pick the `index`-th result; clears the box and yields its symbol.
    pub fn select(&mut self, index: usize) -> Option<Symbol> {
        let symbol = self.results.get(index)?.symbol.clone();

        self.debouncer.cancel();
        self.seq += 1;
        self.query.clear();
        self.results.clear();
        self.show_results = false;
        self.loading = false;
        Some(symbol)
    }

    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "Search: {}{}",
            self.query,
            if self.loading { "  (searching...)" } else { "" }
        )];

        if self.show_results {
            if !self.results.is_empty() {
                for (index, result) in self.results.iter().enumerate() {
                    lines.push(format!("  [{}] {:<8} {}", index + 1, result.symbol.as_str(), result.name));
                }
            } else if !self.query.is_empty() && !self.loading {
                lines.push(format!("  {NO_MATCHES_MESSAGE}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use stockviz_core::{ApiConfig, HttpClient, HttpMethod, HttpResponse, ScriptedHttpClient};
    use tokio::sync::mpsc;

    const APPLE: &str = r#"{"success":true,"data":[{"symbol":"AAPL","name":"Apple Inc.","currentPrice":1.0}],"timestamp":0}"#;

    fn search_box(http: &Arc<ScriptedHttpClient>) -> (SearchBox, mpsc::UnboundedReceiver<SearchEvent>) {
        let api = StockApi::new(ApiConfig::default(), Arc::clone(http) as Arc<dyn HttpClient>);
        let (tx, rx) = mpsc::unbounded_channel();
        (SearchBox::new(api, tx), rx)
    }

    async fn settle(search: &mut SearchBox, rx: &mut mpsc::UnboundedReceiver<SearchEvent>) {
        while let Some(event) = rx.recv().await {
            let done = matches!(event, SearchEvent::Completed { .. });
            search.handle_event(event);
            if done {
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_issue_one_search_for_last_value() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(HttpMethod::Get, "/stocks/search", HttpResponse::ok_json(APPLE));
        let (mut search, mut rx) = search_box(&http);

        search.on_input("A");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.on_input("AP");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.on_input("APP");

        settle(&mut search, &mut rx).await;

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/stocks/search?q=APP"));
        assert!(search.is_open());
        assert_eq!(search.results().len(), 1);
        assert!(!search.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_cancels_pending_search() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(HttpMethod::Get, "/stocks/search", HttpResponse::ok_json(APPLE));
        let (mut search, _rx) = search_box(&http);

        search.on_input("AAPL");
        search.on_input("   ");
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(http.request_count(), 0);
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_results_show_no_match_message() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(
            HttpMethod::Get,
            "/stocks/search",
            HttpResponse::ok_json(r#"{"success":true,"data":[],"timestamp":0}"#),
        );
        let (mut search, mut rx) = search_box(&http);

        search.on_input("ZZZZ");
        settle(&mut search, &mut rx).await;

        assert!(search.render().contains(NO_MATCHES_MESSAGE));
        search.on_outside_click();
        assert!(!search.render().contains(NO_MATCHES_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_receiver_skips_the_request() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(HttpMethod::Get, "/stocks/search", HttpResponse::ok_json(APPLE));
        let (mut search, rx) = search_box(&http);
        drop(rx);

        search.on_input("apple");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(http.requests().is_empty());
        assert!(!search.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn focus_reopens_closed_results() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(HttpMethod::Get, "/stocks/search", HttpResponse::ok_json(APPLE));
        let (mut search, mut rx) = search_box(&http);

        search.on_input("apple");
        settle(&mut search, &mut rx).await;
        search.on_outside_click();
        assert!(!search.is_open());

        search.on_focus();
        assert!(search.is_open());
        assert_eq!(search.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn select_clears_box_and_returns_symbol() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(HttpMethod::Get, "/stocks/search", HttpResponse::ok_json(APPLE));
        let (mut search, mut rx) = search_box(&http);

        search.on_input("apple");
        settle(&mut search, &mut rx).await;

        assert_eq!(search.select(5), None);
        assert_eq!(search.select(0), Some(Symbol::parse("AAPL").expect("symbol")));
        assert_eq!(search.query(), "");
        assert!(search.results().is_empty());
        assert!(!search.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_search_yields_empty_results() {
        let http = Arc::new(ScriptedHttpClient::new());
        http.on(
            HttpMethod::Get,
            "/stocks/search",
            HttpResponse::new(500, r#"{"success":false,"message":"boom"}"#),
        );
        let (mut search, mut rx) = search_box(&http);

        search.on_input("AAPL");
        settle(&mut search, &mut rx).await;

        assert!(search.results().is_empty());
        assert!(!search.is_loading());
    }

    #[tokio::test]
    async fn stale_events_are_ignored() {
        let http = Arc::new(ScriptedHttpClient::new());
        let (mut search, _rx) = search_box(&http);
        search.on_input("A");
        search.on_input("AB");

        let applied = search.handle_event(SearchEvent::Completed {
            seq: 1,
            results: Ok(Vec::new()),
        });
        assert!(!applied);
        assert!(!search.is_open());
    }
}
