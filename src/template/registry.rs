//! Named template storage.
//!
//! Lookup keys are lower-cased; the stored `Template` keeps the name as it
//! was registered. The map itself is an immutable snapshot: every write
//! builds a new map and publishes it in one assignment.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::types::TemplatesConfig;

/// A reusable fragment addressable via `{include name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    content: String,
    description: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            description: String::new(),
        }
    }

    /// Attach a documentation-only description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Immutable name -> template map.
pub type TemplateMap = HashMap<String, Template>;

/// Case-insensitive template registry with atomic publication.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    current: RwLock<Arc<TemplateMap>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration.
    pub fn from_config(config: &TemplatesConfig) -> Self {
        let registry = Self::new();
        registry.load_config(config);
        registry
    }

    /// Register (or overwrite) a template.
    pub fn register(&self, template: Template) {
        let mut guard = self.current.write();
        let mut next = TemplateMap::clone(&guard);
        next.insert(template.name.to_lowercase(), template);
        *guard = Arc::new(next);
    }

    /// Register content under `name`.
    pub fn register_content(&self, name: impl Into<String>, content: impl Into<String>) {
        self.register(Template::new(name, content));
    }

    /// Remove a template. Removing an unknown name is a no-op.
    pub fn unregister(&self, name: &str) {
        let key = name.to_lowercase();
        let mut guard = self.current.write();
        if guard.contains_key(&key) {
            let mut next = TemplateMap::clone(&guard);
            next.remove(&key);
            *guard = Arc::new(next);
        }
    }

    /// Look up a template by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Template> {
        self.current.read().get(&name.to_lowercase()).cloned()
    }

    /// Registered (lower-cased) names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.current.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    /// Remove every template.
    pub fn clear(&self) {
        *self.current.write() = Arc::new(TemplateMap::new());
    }

    /// Replace the whole registry with `templates` in one step.
    pub fn replace_all(&self, templates: impl IntoIterator<Item = Template>) {
        let next: TemplateMap = templates
            .into_iter()
            .map(|t| (t.name.to_lowercase(), t))
            .collect();
        *self.current.write() = Arc::new(next);
    }

    /// Rebuild from configuration, skipping entries with empty content.
    pub fn load_config(&self, config: &TemplatesConfig) {
        let templates = config.templates.iter().filter_map(|(name, entry)| {
            if entry.content.is_empty() {
                debug!("Skipping template '{}' with empty content", name);
                return None;
            }
            debug!("Registered template: {}", name);
            Some(Template::new(name.clone(), entry.content.clone()).with_description(entry.description.clone()))
        });
        self.replace_all(templates);
    }

    /// The map currently in use.
    pub fn snapshot(&self) -> Arc<TemplateMap> {
        self.current.read().clone()
    }
}
