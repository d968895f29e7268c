//! Configuration type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Channel-id sentinel meaning "keep the original destination".
pub const DEFAULT_CHANNEL_SENTINEL: &str = "default";

/// Embed color used when a rule does not set one.
pub const DEFAULT_EMBED_COLOR: &str = "#808080";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Relay settings used by the binary and the bridge orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Channel that unmatched lines (and `"default"` rules) go to.
    #[serde(default = "default_relay_channel")]
    pub default_channel: String,
    /// Static variables available to templates applied to replacements.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_channel: default_relay_channel(),
            variables: BTreeMap::new(),
        }
    }
}

fn default_relay_channel() -> String {
    "console".to_string()
}

/// Message pattern rules.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PatternsConfig {
    /// Master switch; when off nothing matches.
    #[serde(default)]
    pub enabled: bool,
    /// Rules in priority order.
    #[serde(default)]
    pub patterns: Vec<PatternRule>,
}

/// A single classification rule.
///
/// Field names follow the stored rule schema, so this type round-trips
/// through configuration files unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternRule {
    /// Regex, compiled case-insensitively.
    #[serde(default)]
    pub pattern: String,
    /// Plain replacement text, may reference `$1`, `$2`, ...
    #[serde(default)]
    pub replacement: String,
    #[serde(default, rename = "suppressOriginal")]
    pub suppress_original: bool,
    #[serde(default, rename = "asEmbed")]
    pub as_embed: bool,
    #[serde(default, rename = "embedTitle")]
    pub embed_title: String,
    #[serde(default, rename = "embedDescription")]
    pub embed_description: String,
    /// Hex color, `#RRGGBB`.
    #[serde(default = "default_embed_color", rename = "embedColor")]
    pub embed_color: String,
    /// Destination channel id or the `"default"` sentinel.
    #[serde(default = "default_channel_id", rename = "channelID")]
    pub channel_id: String,
}

impl Default for PatternRule {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            replacement: String::new(),
            suppress_original: false,
            as_embed: false,
            embed_title: String::new(),
            embed_description: String::new(),
            embed_color: default_embed_color(),
            channel_id: default_channel_id(),
        }
    }
}

impl PatternRule {
    /// Create a rule for `pattern` with every other field at its default.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Whether this rule routes to the original channel.
    pub fn uses_default_channel(&self) -> bool {
        self.channel_id == DEFAULT_CHANNEL_SENTINEL
    }
}

fn default_embed_color() -> String {
    DEFAULT_EMBED_COLOR.to_string()
}

fn default_channel_id() -> String {
    DEFAULT_CHANNEL_SENTINEL.to_string()
}

/// Reusable template fragments.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplatesConfig {
    /// Whether the relay runs the template engine over replacement text.
    #[serde(default)]
    pub enabled: bool,
    /// Templates keyed by name, usable via `{include name}`.
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateEntry>,
}

/// Stored form of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateEntry {
    /// Template content (supports variables, conditionals, and includes).
    #[serde(default)]
    pub content: String,
    /// Documentation only.
    #[serde(default)]
    pub description: String,
}
