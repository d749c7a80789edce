use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockviz_core::ValidationError),

    #[error(transparent)]
    Api(#[from] stockviz_core::ApiError),

    #[error("storage error: {0}")]
    Store(#[from] stockviz_store::StoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Api(stockviz_core::ApiError::Validation(_)) => 2,
            Self::Api(_) => 3,
            Self::Serialization(_) => 4,
            Self::Store(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockviz_core::{ApiError, ValidationError};

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(CliError::from(ValidationError::EmptySymbol).exit_code(), 2);
        assert_eq!(
            CliError::from(ApiError::Network {
                detail: String::from("refused")
            })
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::from(ApiError::Validation(ValidationError::EmptyBaseUrl)).exit_code(),
            2
        );
        assert_eq!(CliError::Command(String::from("bad")).exit_code(), 2);
    }
}
