//! Rule compilation.
//!
//! Turns configured rules into ready-to-match entries. Invalid regexes are
//! logged and skipped; the remaining rules keep their configured order,
//! which is also their match priority.

use std::collections::HashMap;
use std::sync::Arc;

use fancy_regex::Regex;
use tracing::{debug, info, warn};

use crate::config::types::{PatternRule, PatternsConfig};

/// A compiled regex together with the rule it came from.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The configured rule.
    pub rule: Arc<PatternRule>,
    /// Case-insensitive regex built from `rule.pattern`.
    pub regex: Regex,
    /// Named capture groups -> index, shared with every match snapshot.
    pub group_names: Arc<HashMap<String, usize>>,
}

/// An immutable, fully built list of compiled rules.
///
/// Built off to the side on every reload and published as a whole.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatterns {
    enabled: bool,
    entries: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    /// A disabled snapshot with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether pattern matching is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of successfully compiled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[CompiledPattern] {
        &self.entries
    }
}

/// Compile rules from configuration.
///
/// A disabled config yields an empty, disabled snapshot.
pub fn compile_config(config: &PatternsConfig) -> CompiledPatterns {
    if !config.enabled {
        debug!("Message patterns disabled, nothing to compile");
        return CompiledPatterns::empty();
    }

    let compiled = compile_rules(&config.patterns);
    info!("Loaded {} message pattern(s)", compiled.len());
    compiled
}

/// Compile a list of rules, skipping empty and invalid ones.
pub fn compile_rules(rules: &[PatternRule]) -> CompiledPatterns {
    let entries = rules
        .iter()
        .filter_map(|rule| {
            if rule.pattern.is_empty() {
                debug!("Skipping message pattern with empty regex");
                return None;
            }
            compile_rule(rule)
        })
        .collect();

    CompiledPatterns {
        enabled: true,
        entries,
    }
}

/// Compile one rule, logging and returning `None` on a syntax error.
fn compile_rule(rule: &PatternRule) -> Option<CompiledPattern> {
    match Regex::new(&format!("(?i){}", rule.pattern)) {
        Ok(regex) => {
            let group_names = regex
                .capture_names()
                .enumerate()
                .filter_map(|(i, name)| name.map(|n| (n.to_string(), i)))
                .collect();
            Some(CompiledPattern {
                rule: Arc::new(rule.clone()),
                regex,
                group_names: Arc::new(group_names),
            })
        }
        Err(e) => {
            warn!("Invalid regex pattern '{}', skipping: {}", rule.pattern, e);
            None
        }
    }
}
