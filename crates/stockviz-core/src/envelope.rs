use serde::{Deserialize, Serialize};

/// Standard wrapper around every quote API response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: i64,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful envelope; `None` when `success` is false or
    /// `data` is missing.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Server message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

/// Envelope shape used to pull a message out of an error body without
/// caring about its payload type.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .map(|message| message.trim().to_owned())
            .filter(|message| !message.is_empty())
    }
}
