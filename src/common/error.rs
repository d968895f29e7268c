//! Error types for the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode outcome: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Template reference problems.
///
/// These never abort `process`; the engine logs them and leaves the
/// offending `{include}` token in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template '{name}' not found for include, leaving as-is")]
    UnknownTemplate { name: String },

    #[error("Include cycle detected: {chain}")]
    IncludeCycle { chain: String },
}

/// Failures while expanding `$n` group references in replacement text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("No group {index}")]
    NoSuchGroup { index: usize },

    #[error("No group with name {{{name}}}")]
    NoSuchNamedGroup { name: String },

    #[error("Named group reference is missing trailing '}}'")]
    UnterminatedGroupName,

    #[error("Character to be escaped is missing")]
    TrailingEscape,
}

/// Embed color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid color '{value}' (expected #RRGGBB)")]
    Invalid { value: String },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
