use std::io;

use thiserror::Error;

/// Library-wide error type for cptm-client operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A provider list was supplied without any providers.
    #[error("providers must contain at least one provider")]
    EmptyProviderList,

    /// The same provider identifier appears more than once.
    #[error("The unique identifier \"{0}\" is used more than once")]
    DuplicateProvider(String),

    /// A provider in a caller-supplied list is malformed.
    #[error("provider at index {index} is invalid: {reason}")]
    InvalidProvider { index: usize, reason: String },

    /// Item identifier is invalid.
    #[error("Invalid item identifier '{0}': must be alphanumeric with hyphens, underscores or dots")]
    InvalidItemId(String),

    /// Environment name is not one of development, staging, production.
    #[error("Invalid environment '{0}': must be one of development, staging, production")]
    InvalidEnvironment(String),

    /// Time zone name is not a known IANA zone.
    #[error("Invalid time zone '{0}'")]
    InvalidTimezone(String),

    /// Option store backend failure.
    #[error("Option store error: {0}")]
    Store(String),

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON encoding or decoding failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether the error belongs to the configuration class surfaced at construction.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_)
                | AppError::EmptyProviderList
                | AppError::DuplicateProvider(_)
                | AppError::InvalidProvider { .. }
                | AppError::InvalidItemId(_)
                | AppError::InvalidEnvironment(_)
                | AppError::InvalidTimezone(_)
                | AppError::TomlParseError(_)
        )
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::EmptyProviderList
            | AppError::DuplicateProvider(_)
            | AppError::InvalidProvider { .. }
            | AppError::InvalidItemId(_)
            | AppError::InvalidEnvironment(_)
            | AppError::InvalidTimezone(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::Json(_) => io::ErrorKind::InvalidData,
            AppError::Store(_) | AppError::Http(_) => io::ErrorKind::Other,
        }
    }
}
