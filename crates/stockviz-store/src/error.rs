use thiserror::Error;

/// Failures raised by key-value backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("storage quota exceeded: {requested} bytes requested, {quota} allowed")]
    QuotaExceeded { requested: usize, quota: usize },

    #[error("storage connection lock poisoned")]
    Poisoned,
}
