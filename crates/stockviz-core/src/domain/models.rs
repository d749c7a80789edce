use serde::{Deserialize, Serialize};

use crate::{EpochMillis, Symbol, TimeRange};

/// Latest quote for one symbol, fresh on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Symbol,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    pub timestamp: EpochMillis,
}

impl Quote {
    /// Direction is taken from `change`; `change_percent` is trusted to agree.
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

/// One OHLCV sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub timestamp: EpochMillis,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

/// Chronological samples for a symbol over a requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    pub symbol: Symbol,
    pub range: TimeRange,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

impl HistoryData {
    pub fn new(symbol: Symbol, range: TimeRange, data: Vec<DataPoint>) -> Self {
        Self {
            symbol,
            range,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn first_close(&self) -> Option<f64> {
        self.data.first().map(|point| point.close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.data.last().map(|point| point.close)
    }
}

/// Lightweight lookup match returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: Symbol,
    pub name: String,
}
