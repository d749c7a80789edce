use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::ValidationError;

/// UNIX timestamp in milliseconds, as carried by the quote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self((nanos / 1_000_000) as i64)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn to_offset_datetime(self) -> Result<OffsetDateTime, ValidationError> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000)
            .map_err(|_| ValidationError::TimestampOutOfRange { value: self.0 })
    }

    /// RFC3339 rendering in UTC; falls back to the raw number when out of range.
    pub fn format_rfc3339(self) -> String {
        self.to_offset_datetime()
            .ok()
            .and_then(|value| value.format(&Rfc3339).ok())
            .unwrap_or_else(|| self.0.to_string())
    }

    /// Compact axis label: `Jan 5`, or `Jan 5 14:30` for intraday points.
    pub fn format_axis_label(self, intraday: bool) -> String {
        let Ok(value) = self.to_offset_datetime() else {
            return self.0.to_string();
        };

        let formatted = if intraday {
            value.format(format_description!(
                "[month repr:short] [day padding:none] [hour]:[minute]"
            ))
        } else {
            value.format(format_description!("[month repr:short] [day padding:none]"))
        };
        formatted.unwrap_or_else(|_| self.0.to_string())
    }
}

impl Display for EpochMillis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl From<i64> for EpochMillis {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
