//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `HERALD_CONFIG` - Path to the config file
//! - `HERALD_DEFAULT_CHANNEL` - Channel for unmatched lines
//! - `HERALD_PATTERNS_ENABLED` - Toggle pattern matching
//! - `HERALD_TEMPLATES_ENABLED` - Toggle template expansion of replacements

use std::env;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "HERALD";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(channel) = env::var(format!("{}_DEFAULT_CHANNEL", ENV_PREFIX)) {
        config.relay.default_channel = channel;
    }

    if let Some(enabled) = env_flag(&format!("{}_PATTERNS_ENABLED", ENV_PREFIX)) {
        config.patterns.enabled = enabled;
    }
    if let Some(enabled) = env_flag(&format!("{}_TEMPLATES_ENABLED", ENV_PREFIX)) {
        config.templates.enabled = enabled;
    }

    config
}

/// Read a boolean environment variable, ignoring values that don't parse.
fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    let parsed = parse_flag(&value);
    if parsed.is_none() {
        warn!("Ignoring {}='{}': expected true/false", name, value);
    }
    parsed
}

/// Parse a lenient boolean flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the config file path from environment or use default.
///
/// Checks `HERALD_CONFIG` environment variable, otherwise returns "herald.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "herald.conf".to_string())
}
