//! # Domain Models
//!
//! Value records exchanged with the quote API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Latest price snapshot for a symbol |
//! | [`HistoryData`] | Chronological OHLCV samples for a range |
//! | [`DataPoint`] | One OHLCV sample |
//! | [`SearchResult`] | Symbol/name lookup match |
//! | [`Symbol`] | Validated ticker |
//! | [`TimeRange`] | History window (1D, 1W, 1M, 3M, 1Y) |
//! | [`EpochMillis`] | Millisecond UNIX timestamp |
//!
//! Records carry no identity beyond their ticker symbol; every relationship
//! is a symbol lookup.

mod models;
mod range;
mod symbol;
mod timestamp;

pub use models::{DataPoint, HistoryData, Quote, SearchResult};
pub use range::TimeRange;
pub use symbol::Symbol;
pub use timestamp::EpochMillis;
