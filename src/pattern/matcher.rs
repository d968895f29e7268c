//! Priority-ordered message matching.
//!
//! The compiled rule list is an immutable snapshot behind an `Arc`. Reload
//! builds a complete new snapshot and swaps it in with one assignment, so a
//! concurrent `match_message` sees either the old list or the new one.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::types::{PatternRule, PatternsConfig};
use crate::pattern::captures::CaptureSnapshot;
use crate::pattern::compiler::{compile_config, compile_rules, CompiledPattern, CompiledPatterns};
use crate::pattern::decision::{MatchDecision, PatternMatch};

/// Matches messages against the current compiled rule snapshot.
#[derive(Debug, Default)]
pub struct PatternMatcher {
    current: RwLock<Arc<CompiledPatterns>>,
}

impl PatternMatcher {
    /// Create a matcher with no rules (matches nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher from configuration.
    pub fn from_config(config: &PatternsConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(compile_config(config))),
        }
    }

    /// Rebuild from configuration and publish the result.
    pub fn reload(&self, config: &PatternsConfig) {
        self.publish(compile_config(config));
    }

    /// Rebuild from a bare rule list (treated as enabled) and publish it.
    pub fn reload_rules(&self, rules: &[PatternRule]) {
        self.publish(compile_rules(rules));
    }

    /// Replace the current snapshot.
    pub fn publish(&self, compiled: CompiledPatterns) {
        *self.current.write() = Arc::new(compiled);
    }

    /// The snapshot currently in use.
    pub fn snapshot(&self) -> Arc<CompiledPatterns> {
        self.current.read().clone()
    }

    /// Number of compiled entries in the current snapshot.
    pub fn pattern_count(&self) -> usize {
        self.current.read().len()
    }

    /// Match `message` against the rules in priority order.
    ///
    /// The first rule that matches wins; later rules are never tried.
    pub fn match_message(&self, message: &str) -> MatchDecision {
        match_snapshot(&self.snapshot(), message)
    }
}

/// Match `message` against a specific snapshot.
pub fn match_snapshot(compiled: &CompiledPatterns, message: &str) -> MatchDecision {
    if message.is_empty() || !compiled.is_enabled() {
        return MatchDecision::NoMatch;
    }

    for entry in compiled.entries() {
        if let Some(captures) = try_entry(entry, message) {
            debug!(pattern = %entry.rule.pattern, "Message matched pattern");
            return MatchDecision::Matched(PatternMatch::new(
                Arc::clone(&entry.rule),
                message,
                captures,
            ));
        }
    }

    MatchDecision::NoMatch
}

/// Try one entry against the message.
///
/// A full-string match always implies a leftmost search hit, and the
/// snapshot is taken from the leftmost hit either way, so a single search
/// covers both attempts. Engine errors (e.g. backtrack limit) count as no
/// match for this entry only.
fn try_entry(entry: &CompiledPattern, message: &str) -> Option<CaptureSnapshot> {
    match entry.regex.captures(message) {
        Ok(Some(caps)) => Some(CaptureSnapshot::from_captures(
            &caps,
            Arc::clone(&entry.group_names),
        )),
        Ok(None) => None,
        Err(e) => {
            warn!("Error matching pattern '{}' against message: {}", entry.rule.pattern, e);
            None
        }
    }
}
