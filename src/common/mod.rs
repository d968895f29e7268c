//! Common types shared across the application.

pub mod error;
pub mod messages;
pub mod types;

pub use error::{AppError, ColorError, ConfigError, SubstitutionError, TemplateError};
pub use messages::{RelayOutcome, RoutedReplacement};
pub use types::{ReplacementMessage, Rgb, Variables};
