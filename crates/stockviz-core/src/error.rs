use thiserror::Error;

/// Validation errors for domain values built from user or wire input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter, digit or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid range '{value}', expected one of 1D, 1W, 1M, 3M, 1Y")]
    InvalidRange { value: String },

    #[error("timestamp {value} is outside the representable range")]
    TimestampOutOfRange { value: i64 },

    #[error("api base url cannot be empty")]
    EmptyBaseUrl,
}

/// Failure of an API call.
///
/// `Display` yields the message meant for the user: the generic
/// `Network error` for transport failures, otherwise the server's message or
/// the operation's fallback text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error")]
    Network { detail: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "api.network",
            Self::Server { .. } => "api.server",
            Self::Rejected { .. } => "api.rejected",
            Self::Decode(_) => "api.decode",
            Self::Validation(_) => "api.validation",
        }
    }
}
