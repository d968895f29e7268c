//! Template processing pipeline.
//!
//! `process` runs three stages in a fixed order:
//!
//! 1. `{include name}` expansion, each include rendered through the whole
//!    pipeline with the caller's variables
//! 2. `{if}` / `{ifnot}` resolution
//! 3. `%name%` / `%name|default%` substitution
//!
//! Includes go first so that conditionals and variables coming from an
//! included fragment are resolved against the caller's variables.

use std::sync::Arc;

use crate::common::types::Variables;
use crate::config::types::TemplatesConfig;
use crate::template::conditional::resolve_conditionals;
use crate::template::include::expand_includes;
use crate::template::registry::{Template, TemplateMap, TemplateRegistry};
use crate::template::variables::substitute_variables;

/// Template engine backed by a shared registry.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    registry: Arc<TemplateRegistry>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over an existing registry.
    pub fn with_registry(registry: Arc<TemplateRegistry>) -> Self {
        Self { registry }
    }

    /// Engine whose registry is loaded from configuration.
    pub fn from_config(config: &TemplatesConfig) -> Self {
        Self::with_registry(Arc::new(TemplateRegistry::from_config(config)))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn register_template(&self, name: impl Into<String>, content: impl Into<String>) {
        self.registry.register_content(name, content);
    }

    pub fn unregister_template(&self, name: &str) {
        self.registry.unregister(name);
    }

    pub fn get_template(&self, name: &str) -> Option<Template> {
        self.registry.get(name)
    }

    /// Process `template` with `variables`.
    ///
    /// The registry is read once, so a concurrent reload never mixes old
    /// and new templates within one call.
    pub fn process(&self, template: &str, variables: &Variables) -> String {
        if template.is_empty() {
            return String::new();
        }
        let templates = self.registry.snapshot();
        render(template, variables, &templates, &mut Vec::new())
    }

    /// Like [`process`](Self::process), passing `None` through.
    pub fn process_opt(&self, template: Option<&str>, variables: &Variables) -> Option<String> {
        template.map(|t| self.process(t, variables))
    }
}

fn render(
    text: &str,
    variables: &Variables,
    templates: &TemplateMap,
    chain: &mut Vec<String>,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let included = expand_includes(text, templates, chain, |content, chain| {
        render(content, variables, templates, chain)
    });
    let resolved = resolve_conditionals(&included, variables);
    substitute_variables(&resolved, variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_variables() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("player", "Steve"), ("msg", "Hello World")]);
        assert_eq!(engine.process("%player% said: %msg%", &vars), "Steve said: Hello World");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("a", "x")]);
        for text in ["hello world", "50 percent", "{not a block}", "a | b", "line\nbreak"] {
            assert_eq!(engine.process(text, &vars), text);
        }
    }

    #[test]
    fn test_if_block_absent_or_empty() {
        let engine = TemplateEngine::new();
        let text = "{if a}%a%{/if}";
        assert_eq!(engine.process(text, &make_vars(&[("a", "5")])), "5");
        assert_eq!(engine.process(text, &Variables::new()), "");
        assert_eq!(engine.process(text, &make_vars(&[("a", "")])), "");
    }

    #[test]
    fn test_equality_block() {
        let engine = TemplateEngine::new();
        let text = "{if a==\"5\"}Y{/if}";
        assert_eq!(engine.process(text, &make_vars(&[("a", "5")])), "Y");
        assert_eq!(engine.process(text, &make_vars(&[("a", "6")])), "");
    }

    #[test]
    fn test_conditional_with_variables() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("online", "5"), ("player", "Steve")]);
        assert_eq!(
            engine.process("{if online}%player% is online (%online% players){/if}", &vars),
            "Steve is online (5 players)"
        );
    }

    #[test]
    fn test_include() {
        let engine = TemplateEngine::new();
        engine.register_template("greeting", "Hello %player%!");
        let vars = make_vars(&[("player", "Steve")]);
        assert_eq!(
            engine.process("{include greeting} Welcome to the server!", &vars),
            "Hello Steve! Welcome to the server!"
        );
    }

    #[test]
    fn test_nested_includes() {
        let engine = TemplateEngine::new();
        engine.register_template("header", "=== %title% ===");
        engine.register_template("message", "{include header}\n%content%");
        let vars = make_vars(&[("title", "Server Status"), ("content", "Server is online")]);
        assert_eq!(
            engine.process("{include message}", &vars),
            "=== Server Status ===\nServer is online"
        );
    }

    #[test]
    fn test_include_inside_conditional() {
        let engine = TemplateEngine::new();
        engine.register_template("playerInfo", "Player: %player%");
        let vars = make_vars(&[("player", "Steve"), ("online", "5"), ("max", "20")]);
        assert_eq!(
            engine.process("{if online}{include playerInfo} (%online%/%max% online){/if}", &vars),
            "Player: Steve (5/20 online)"
        );
    }

    #[test]
    fn test_included_conditional_uses_caller_variables() {
        let engine = TemplateEngine::new();
        engine.register_template("status", "{if up}UP{/if}{ifnot up}DOWN{/ifnot}");
        assert_eq!(engine.process("[{include status}]", &make_vars(&[("up", "1")])), "[UP]");
        assert_eq!(engine.process("[{include status}]", &make_vars(&[("up", "0")])), "[DOWN]");
    }

    #[test]
    fn test_multiple_conditionals() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[
            ("hasAdvancement", "true"),
            ("player", "Steve"),
            ("advName", "Diamonds!"),
        ]);
        assert_eq!(
            engine.process(
                "{if hasAdvancement}%player% earned %advName%{/if}{ifnot hasAdvancement}No advancement{/ifnot}",
                &vars
            ),
            "Steve earned Diamonds!"
        );
    }

    #[test]
    fn test_nested_conditionals() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("online", "5"), ("player", "Steve")]);
        assert_eq!(
            engine.process("{if online}{if player}%player% is online (%online% players){/if}{/if}", &vars),
            "Steve is online (5 players)"
        );
    }

    #[test]
    fn test_multiline_conditional() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("online", "5")]);
        let out = engine.process("{if online}\nPlayers online: %online%\nServer is active\n{/if}", &vars);
        assert!(out.contains("Players online: 5"));
        assert!(out.contains("Server is active"));
    }

    #[test]
    fn test_empty_and_absent() {
        let engine = TemplateEngine::new();
        let vars = Variables::new();
        assert_eq!(engine.process("", &vars), "");
        assert_eq!(engine.process_opt(None, &vars), None);
        assert_eq!(engine.process_opt(Some(""), &vars).as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_include_left_in_output() {
        let engine = TemplateEngine::new();
        let vars = make_vars(&[("player", "Steve")]);
        assert_eq!(
            engine.process("{include missing} %player%", &vars),
            "{include missing} Steve"
        );
    }

    #[test]
    fn test_self_including_template_terminates() {
        let engine = TemplateEngine::new();
        engine.register_template("loop", "%x%{include loop}");
        let vars = make_vars(&[("x", "1")]);
        assert_eq!(engine.process("{include loop}", &vars), "1{include loop}");
    }

    #[test]
    fn test_registry_management() {
        let engine = TemplateEngine::new();
        engine.register_template("Test", "Hello World");
        assert_eq!(engine.get_template("TEST").unwrap().name(), "Test");

        engine.unregister_template("test");
        assert!(engine.get_template("test").is_none());
    }

    #[test]
    fn test_shared_registry_sees_updates() {
        let registry = Arc::new(TemplateRegistry::new());
        let engine = TemplateEngine::with_registry(Arc::clone(&registry));
        registry.register_content("sig", "-- bot");
        assert_eq!(engine.process("{include sig}", &Variables::new()), "-- bot");
    }
}
