//! Relay orchestrator.
//!
//! Runs one console line through the pattern matcher and replacement
//! builder, optionally templating the rule's text first, and reports what
//! the transport should do with it.
//!
//! Templates run on the rule's own fields before group expansion, so text
//! captured from the line is inserted verbatim and never parsed as
//! template syntax.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::common::messages::{RelayOutcome, RoutedReplacement};
use crate::common::types::Variables;
use crate::config::types::{Config, PatternRule};
use crate::pattern::builder::{build_with_fields, ReplacementFields};
use crate::pattern::captures::escape_group_refs;
use crate::pattern::matcher::PatternMatcher;
use crate::template::engine::TemplateEngine;

/// Relay settings that change on reload.
#[derive(Debug, Clone, Default)]
struct RelaySettings {
    default_channel: String,
    variables: Variables,
    templates_enabled: bool,
}

impl RelaySettings {
    fn from_config(config: &Config) -> Self {
        Self {
            default_channel: config.relay.default_channel.clone(),
            variables: config
                .relay
                .variables
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            templates_enabled: config.templates.enabled,
        }
    }
}

/// Line relay combining the pattern matcher and the template engine.
pub struct Relay {
    matcher: PatternMatcher,
    engine: TemplateEngine,
    settings: RwLock<Arc<RelaySettings>>,
}

impl Relay {
    /// Create a relay from configuration.
    pub fn new(config: &Config) -> Self {
        let relay = Self {
            matcher: PatternMatcher::new(),
            engine: TemplateEngine::new(),
            settings: RwLock::new(Arc::new(RelaySettings::default())),
        };
        relay.reload(config);
        relay
    }

    /// Rebuild patterns, templates and settings from `config`.
    ///
    /// Each piece is published as a whole; lines in flight finish against
    /// whatever they already read.
    pub fn reload(&self, config: &Config) {
        self.matcher.reload(&config.patterns);

        if config.templates.enabled {
            self.engine.registry().load_config(&config.templates);
        } else {
            self.engine.registry().clear();
        }

        *self.settings.write() = Arc::new(RelaySettings::from_config(config));

        info!(
            "Relay configured: {} pattern(s), {} template(s), default channel '{}'",
            self.matcher.pattern_count(),
            self.engine.registry().len(),
            config.relay.default_channel
        );
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Channel used for lines that arrive without one.
    pub fn default_channel(&self) -> String {
        self.settings.read().default_channel.clone()
    }

    /// Handle a line bound for the default channel.
    pub fn handle_default(&self, line: &str) -> RelayOutcome {
        let settings = self.settings.read().clone();
        self.handle_with(&settings, line, &settings.default_channel)
    }

    /// Decide what to do with `line`, which would normally go to
    /// `original_channel`.
    pub fn handle_line(&self, line: &str, original_channel: &str) -> RelayOutcome {
        let settings = self.settings.read().clone();
        self.handle_with(&settings, line, original_channel)
    }

    fn handle_with(&self, settings: &RelaySettings, line: &str, original_channel: &str) -> RelayOutcome {
        let decision = self.matcher.match_message(line);
        let Some(rule) = decision.rule() else {
            return RelayOutcome::passthrough(line, original_channel);
        };

        let fields = if settings.templates_enabled {
            self.template_fields(rule, settings, line, original_channel)
        } else {
            ReplacementFields::from_rule(rule)
        };
        let replacement = build_with_fields(&decision, &fields).map(|message| RoutedReplacement {
            channel: decision.target_channel(original_channel).to_string(),
            message,
        });

        debug!(
            pattern = %rule.pattern,
            suppress = decision.should_suppress_original(),
            replaced = replacement.is_some(),
            "Line matched"
        );

        RelayOutcome {
            line: line.to_string(),
            original_channel: original_channel.to_string(),
            forward_original: !decision.should_suppress_original(),
            matched_pattern: Some(rule.pattern.clone()),
            replacement,
        }
    }

    /// Run the template engine over the rule's text fields.
    ///
    /// Variable values are escaped so that `$` and `\` inside them survive
    /// the group expansion that follows.
    fn template_fields(
        &self,
        rule: &PatternRule,
        settings: &RelaySettings,
        line: &str,
        channel: &str,
    ) -> ReplacementFields {
        let mut variables: Variables = settings
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), escape_group_refs(v)))
            .collect();
        variables.insert("line".to_string(), escape_group_refs(line));
        variables.insert("channel".to_string(), escape_group_refs(channel));

        ReplacementFields {
            replacement: self.engine.process(&rule.replacement, &variables),
            embed_title: self.engine.process(&rule.embed_title, &variables),
            embed_description: self.engine.process(&rule.embed_description, &variables),
        }
    }
}
