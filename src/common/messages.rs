//! Canonical message types for relay output.
//!
//! The transport that actually suppresses or sends messages consumes these;
//! nothing in this crate delivers them.

use serde::Serialize;

use crate::common::types::ReplacementMessage;

/// A replacement message together with its resolved destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedReplacement {
    /// Destination channel (the original channel when the rule used `"default"`).
    pub channel: String,
    /// The message to send.
    pub message: ReplacementMessage,
}

/// What the relay decided for one incoming line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayOutcome {
    /// The line as received.
    pub line: String,
    /// Channel the line would have gone to without any rule.
    pub original_channel: String,
    /// Whether the original line should still be forwarded.
    pub forward_original: bool,
    /// Pattern of the rule that matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_pattern: Option<String>,
    /// Replacement to send, if the matched rule produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<RoutedReplacement>,
}

impl RelayOutcome {
    /// Outcome for a line no rule matched: forward it untouched.
    pub fn passthrough(line: impl Into<String>, original_channel: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            original_channel: original_channel.into(),
            forward_original: true,
            matched_pattern: None,
            replacement: None,
        }
    }
}
