//! Behavior tests for watchlist persistence on both storage backends.

use std::sync::Arc;

use stockviz_store::{DuckDbStore, StoreConfig, WATCHLIST_KEY};
use stockviz_tests::*;
use tempfile::tempdir;

#[test]
fn watchlist_survives_restart_on_disk() {
    // Given: a user stars two symbols
    let temp = tempdir().expect("tempdir");
    let config = StoreConfig::in_home(temp.path().join("home"));
    {
        let store = DuckDbStore::open(config.clone()).expect("open");
        let watchlist = WatchlistRepository::new(Arc::new(store));
        assert!(watchlist.add(&symbol("TSLA")));
        assert!(watchlist.add(&symbol("AAPL")));
    }

    // When: the application starts again
    let store = DuckDbStore::open(config).expect("reopen");
    let watchlist = WatchlistRepository::new(Arc::new(store));

    // Then: the list comes back in insertion order
    assert_eq!(watchlist.list(), vec![symbol("TSLA"), symbol("AAPL")]);
}

#[test]
fn adding_twice_keeps_one_entry() {
    let (_, watchlist) = memory_watchlist();

    assert!(watchlist.add(&symbol("AAPL")));
    assert!(!watchlist.add(&symbol("aapl")));
    assert!(watchlist.contains(&symbol("AAPL")));
    assert_eq!(watchlist.list().len(), 1);
}

#[test]
fn removing_absent_symbol_changes_nothing() {
    let (_, watchlist) = memory_watchlist();
    watchlist.save(&[symbol("AAPL"), symbol("MSFT")]);

    assert!(!watchlist.remove(&symbol("GOOGL")));
    assert_eq!(watchlist.list(), vec![symbol("AAPL"), symbol("MSFT")]);
}

#[test]
fn unreadable_value_is_treated_as_empty() {
    let (store, watchlist) = memory_watchlist();
    store.set_item(WATCHLIST_KEY, "not json at all").expect("set");

    assert!(watchlist.list().is_empty());
    assert!(watchlist.add(&symbol("AAPL")));
    assert_eq!(watchlist.list(), vec![symbol("AAPL")]);
}

#[test]
fn full_store_reports_add_but_keeps_old_list() {
    let store = Arc::new(MemoryStore::with_quota(WATCHLIST_KEY.len() + 10));
    let watchlist = WatchlistRepository::new(store);

    assert!(watchlist.add(&symbol("AAPL")));
    assert!(watchlist.add(&symbol("NVDA")));
    assert_eq!(watchlist.list(), vec![symbol("AAPL")]);
}
