//! # Stockviz Core
//!
//! Domain types and the HTTP client for the stockviz quote viewer.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Quote API client ([`StockApi`]) |
//! | [`config`] | Base URL and timeout configuration |
//! | [`domain`] | Quote, history, search and ticker types |
//! | [`envelope`] | `{success, message, data, timestamp}` response wrapper |
//! | [`error`] | Validation and API errors |
//! | [`http_client`] | Transport trait with reqwest and scripted implementations |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockviz_core::{ApiConfig, StockApi, Symbol, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = StockApi::with_reqwest(ApiConfig::from_env());
//!     let symbol = Symbol::parse("AAPL")?;
//!
//!     let (quote, history) = tokio::try_join!(
//!         api.get_quote(&symbol),
//!         api.get_history(&symbol, TimeRange::OneMonth),
//!     )?;
//!     println!("{} ${:.2} ({} points)", quote.symbol, quote.current_price, history.data.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockviz_core::ApiError;
//!
//! fn banner(error: &ApiError) -> String {
//!     match error {
//!         ApiError::Network { .. } => String::from("Network error"),
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;

pub use api::StockApi;

pub use config::{ApiConfig, API_URL_ENV, DEFAULT_API_URL, REQUEST_TIMEOUT};

pub use domain::{DataPoint, EpochMillis, HistoryData, Quote, SearchResult, Symbol, TimeRange};

pub use envelope::ApiEnvelope;

pub use error::{ApiError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient, ScriptedReply,
};
