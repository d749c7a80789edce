//! Watchlist persistence.
//!
//! The watchlist is stored under a single key as a JSON array of ticker
//! strings. Every operation is best-effort: a storage or encoding failure is
//! logged and the call degrades to an empty list or a no-op, so callers never
//! handle storage errors.

use std::sync::Arc;

use stockviz_core::Symbol;
use tracing::warn;

use crate::{KeyValueStore, StoreError};

/// Storage key holding the watchlist.
pub const WATCHLIST_KEY: &str = "stock_watchlist";

/// Ordered, duplicate-free list of tracked symbols.
#[derive(Clone)]
pub struct WatchlistRepository {
    store: Arc<dyn KeyValueStore>,
}

impl WatchlistRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored symbols in insertion order; empty when nothing readable is stored.
    pub fn list(&self) -> Vec<Symbol> {
        match self.try_list() {
            Ok(symbols) => symbols,
            Err(error) => {
                warn!(error = %error, "failed to read watchlist");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list.
    pub fn save(&self, symbols: &[Symbol]) {
        if let Err(error) = self.try_save(symbols) {
            warn!(error = %error, count = symbols.len(), "failed to save watchlist");
        }
    }

    /// Append `symbol` unless already present. Returns `false` for duplicates.
    ///
    /// A failed write is logged only; the call still reports `true`.
    pub fn add(&self, symbol: &Symbol) -> bool {
        let mut symbols = self.list();
        if symbols.contains(symbol) {
            return false;
        }

        symbols.push(symbol.clone());
        self.save(&symbols);
        true
    }

    /// Remove `symbol`. Returns `false` when it was not in the list.
    pub fn remove(&self, symbol: &Symbol) -> bool {
        let symbols = self.list();
        let filtered: Vec<Symbol> = symbols.iter().filter(|s| *s != symbol).cloned().collect();
        if filtered.len() == symbols.len() {
            return false;
        }

        self.save(&filtered);
        true
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.list().contains(symbol)
    }

    /// Drop the stored list entirely.
    pub fn clear(&self) {
        if let Err(error) = self.store.remove_item(WATCHLIST_KEY) {
            warn!(error = %error, "failed to clear watchlist");
        }
    }

    fn try_list(&self) -> Result<Vec<Symbol>, StoreError> {
        let Some(raw) = self.store.get_item(WATCHLIST_KEY)? else {
            return Ok(Vec::new());
        };

        let entries: Vec<String> = serde_json::from_str(&raw)?;
        let mut symbols: Vec<Symbol> = Vec::with_capacity(entries.len());
        for entry in entries {
            match Symbol::parse(&entry) {
                Ok(symbol) if !symbols.contains(&symbol) => symbols.push(symbol),
                Ok(_) => {}
                Err(error) => warn!(entry = %entry, error = %error, "skipping invalid watchlist entry"),
            }
        }
        Ok(symbols)
    }

    fn try_save(&self, symbols: &[Symbol]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(symbols)?;
        self.store.set_item(WATCHLIST_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    fn repository() -> (Arc<MemoryStore>, WatchlistRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = WatchlistRepository::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
        (store, repo)
    }

    #[test]
    fn add_then_contains_and_duplicate_add_is_rejected() {
        let (_, repo) = repository();
        let aapl = symbol("AAPL");

        assert!(repo.add(&aapl));
        assert!(repo.contains(&aapl));
        assert!(!repo.add(&aapl));
        assert_eq!(repo.list(), vec![aapl]);
    }

    #[test]
    fn remove_absent_symbol_returns_false_and_keeps_list() {
        let (_, repo) = repository();
        repo.save(&[symbol("AAPL"), symbol("MSFT")]);

        assert!(!repo.remove(&symbol("TSLA")));
        assert_eq!(repo.list(), vec![symbol("AAPL"), symbol("MSFT")]);

        assert!(repo.remove(&symbol("AAPL")));
        assert_eq!(repo.list(), vec![symbol("MSFT")]);
    }

    #[test]
    fn save_then_list_preserves_order() {
        let (_, repo) = repository();
        let list = vec![symbol("TSLA"), symbol("AAPL"), symbol("BRK.B")];

        repo.save(&list);
        assert_eq!(repo.list(), list);
    }

    #[test]
    fn stored_value_is_a_json_array_of_strings() {
        let (store, repo) = repository();
        repo.add(&symbol("aapl"));

        assert_eq!(
            store.get_item(WATCHLIST_KEY).expect("get").as_deref(),
            Some(r#"["AAPL"]"#)
        );
    }

    #[test]
    fn corrupt_value_reads_as_empty() {
        let (store, repo) = repository();
        store.set_item(WATCHLIST_KEY, "{not json").expect("set");

        assert!(repo.list().is_empty());
        assert!(!repo.contains(&symbol("AAPL")));
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let (store, repo) = repository();
        store
            .set_item(WATCHLIST_KEY, r#"["AAPL","", "BAD/X", "msft"]"#)
            .expect("set");

        assert_eq!(repo.list(), vec![symbol("AAPL"), symbol("MSFT")]);
    }

    #[test]
    fn clear_removes_key() {
        let (store, repo) = repository();
        repo.add(&symbol("AAPL"));
        repo.clear();

        assert_eq!(store.get_item(WATCHLIST_KEY).expect("get"), None);
        assert!(repo.list().is_empty());
    }

    #[test]
    fn quota_failure_is_swallowed() {
        let store = Arc::new(MemoryStore::with_quota(24));
        let repo = WatchlistRepository::new(store);

        assert!(repo.add(&symbol("AAPL")));
        assert!(repo.add(&symbol("MSFT")));
        assert_eq!(repo.list(), vec![symbol("AAPL")]);
    }
}
