//! Behavior tests for debounced search as a user types.

use std::time::Duration;

use stockviz_tests::*;
use stockviz_ui::{SearchBox, SearchEvent};
use tokio::sync::mpsc;

async fn next_completion(search: &mut SearchBox, rx: &mut mpsc::UnboundedReceiver<SearchEvent>) {
    while let Some(event) = rx.recv().await {
        let completed = matches!(event, SearchEvent::Completed { .. });
        search.handle_event(event);
        if completed {
            return;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn three_quick_keystrokes_send_one_request_with_last_value() {
    // Given: a search box wired to the scripted backend
    let (http, api) = scripted_api();
    http.on(
        HttpMethod::Get,
        "/stocks/search",
        ok(&format!("[{}]", quote_json("TSLA", 200.0, 1.0, 0.5))),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut search = SearchBox::new(api, tx);

    // When: the user types three characters within 500 ms
    search.on_input("t");
    tokio::time::sleep(Duration::from_millis(150)).await;
    search.on_input("ts");
    tokio::time::sleep(Duration::from_millis(150)).await;
    search.on_input("tsl");
    next_completion(&mut search, &mut rx).await;

    // Then: exactly one request went out, for the final text
    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("?q=tsl"));
    assert_eq!(search.results()[0].symbol, symbol("TSLA"));
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_debounce_send_each_query() {
    let (http, api) = scripted_api();
    http.on(HttpMethod::Get, "/stocks/search", ok("[]"));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut search = SearchBox::new(api, tx);

    search.on_input("a");
    next_completion(&mut search, &mut rx).await;
    search.on_input("ap");
    next_completion(&mut search, &mut rx).await;

    assert_eq!(http.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn clearing_input_before_timer_fires_sends_nothing() {
    let (http, api) = scripted_api();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut search = SearchBox::new(api, tx);

    search.on_input("goo");
    tokio::time::sleep(Duration::from_millis(300)).await;
    search.on_input("");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(http.request_count(), 0);
    assert!(search.results().is_empty());
}
