//! `DuckDB`-backed durable key-value store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ::duckdb::{params, Connection};

use crate::migrations;
use crate::{KeyValueStore, StoreConfig, StoreError};

/// Shared handle to a single `DuckDB` connection.
///
/// Every storage call is short and originates from the UI loop, so one
/// serialized connection is enough.
#[derive(Clone)]
pub struct DuckDbConnectionManager {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DuckDbConnectionManager {
    /// Open (or create) the database file and apply pending migrations.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db_path = path.into();
        let connection = Connection::open(&db_path)?;
        configure_connection(&connection)?;
        migrations::apply_migrations(&connection)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// In-memory database, discarded when the last handle drops.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory()?;
        configure_connection(&connection)?;
        migrations::apply_migrations(&connection)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, ::duckdb::Error>,
    ) -> Result<T, StoreError> {
        let connection = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        f(&connection).map_err(StoreError::from)
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }
}

fn configure_connection(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch("PRAGMA disable_progress_bar;")
}

/// Durable [`KeyValueStore`] persisted in a `DuckDB` file.
#[derive(Clone)]
pub struct DuckDbStore {
    manager: DuckDbConnectionManager,
}

impl DuckDbStore {
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let manager = DuckDbConnectionManager::open(config.db_path)?;
        tracing::debug!(path = %manager.db_path().display(), "opened storage");
        Ok(Self { manager })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            manager: DuckDbConnectionManager::open_in_memory()?,
        })
    }

    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }
}

impl KeyValueStore for DuckDbStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.manager.with_connection(|connection| {
            let mut statement = connection.prepare("SELECT value FROM kv_store WHERE key = ?")?;
            let mut rows = statement.query(params![key])?;
            match rows.next()? {
                Some(row) => Ok(Some(row.get(0)?)),
                None => Ok(None),
            }
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.manager.with_connection(|connection| {
            connection.execute(
                r#"
INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.manager.with_connection(|connection| {
            connection.execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(root: &Path) -> StoreConfig {
        StoreConfig {
            home: root.join("stockviz-home"),
            db_path: root.join("stockviz-home").join("storage.duckdb"),
        }
    }

    #[test]
    fn set_get_and_remove_item() {
        let store = DuckDbStore::open_in_memory().expect("store");

        assert_eq!(store.get_item("missing").expect("get"), None);

        store.set_item("k", "v1").expect("set");
        store.set_item("k", "v2").expect("overwrite");
        assert_eq!(store.get_item("k").expect("get").as_deref(), Some("v2"));

        store.remove_item("k").expect("remove");
        assert_eq!(store.get_item("k").expect("get"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let temp = tempdir().expect("tempdir");

        {
            let store = DuckDbStore::open(config_in(temp.path())).expect("open");
            store.set_item("stock_watchlist", r#"["AAPL"]"#).expect("set");
        }

        let reopened = DuckDbStore::open(config_in(temp.path())).expect("reopen");
        assert_eq!(
            reopened.get_item("stock_watchlist").expect("get").as_deref(),
            Some(r#"["AAPL"]"#)
        );
    }

    #[test]
    fn keys_are_bound_as_parameters() {
        let store = DuckDbStore::open_in_memory().expect("store");
        let hostile = "x'; DROP TABLE kv_store; --";

        store.set_item(hostile, "1").expect("set");
        assert_eq!(store.get_item(hostile).expect("get").as_deref(), Some("1"));
        assert_eq!(store.get_item("other").expect("table still exists"), None);
    }
}
