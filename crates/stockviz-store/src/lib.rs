//! Local persistence for stockviz.
//!
//! A small string key-value abstraction ([`KeyValueStore`]) with a durable
//! `DuckDB` backend and an in-memory backend, plus the
//! [`WatchlistRepository`] that keeps the user's tracked symbols.

pub mod duckdb;
mod error;
pub mod memory;
pub mod migrations;
pub mod watchlist;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub use self::duckdb::{DuckDbConnectionManager, DuckDbStore};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use watchlist::{WatchlistRepository, WATCHLIST_KEY};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "STOCKVIZ_HOME";

/// String-keyed storage with browser-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub home: PathBuf,
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn in_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let db_path = home.join("storage.duckdb");
        Self { home, db_path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_home(resolve_home())
    }
}

fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os(HOME_ENV) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".stockviz");
    }

    PathBuf::from(".stockviz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_home_places_database_under_home() {
        let config = StoreConfig::in_home("/tmp/sv");
        assert_eq!(config.db_path, PathBuf::from("/tmp/sv/storage.duckdb"));
    }
}
