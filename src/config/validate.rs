//! Configuration validation.
//!
//! Structural problems fail the load. Problems the engine already degrades
//! around (bad regex, bad color, dangling include) are reported as warnings
//! so they show up at startup instead of on the first matching line.

use fancy_regex::Regex;

use crate::common::error::ConfigError;
use crate::config::types::Config;
use crate::pattern::color::parse_hex_color;
use crate::template::include::referenced_templates;

/// Validate a configuration.
///
/// Returns the list of non-fatal warnings on success.
pub fn validate_config(config: &Config) -> Result<Vec<String>, ConfigError> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.relay.default_channel.trim().is_empty() {
        errors.push("relay.default_channel is required".to_string());
    }

    for (i, rule) in config.patterns.patterns.iter().enumerate() {
        if rule.channel_id.trim().is_empty() {
            errors.push(format!(
                "patterns.patterns[{}].channelID is empty (use \"default\" to keep the original channel)",
                i
            ));
        }

        if rule.pattern.is_empty() {
            warnings.push(format!("patterns.patterns[{}] has no pattern and will be skipped", i));
            continue;
        }
        if let Err(e) = Regex::new(&format!("(?i){}", rule.pattern)) {
            warnings.push(format!(
                "patterns.patterns[{}] is not a valid regex and will be skipped: '{}' ({})",
                i, rule.pattern, e
            ));
        }
        if rule.as_embed && parse_hex_color(&rule.embed_color).is_err() {
            warnings.push(format!(
                "patterns.patterns[{}].embedColor '{}' is invalid, gray will be used",
                i, rule.embed_color
            ));
        }
    }

    let known: Vec<String> = config
        .templates
        .templates
        .keys()
        .map(|name| name.to_lowercase())
        .collect();
    for (name, entry) in &config.templates.templates {
        if entry.content.is_empty() {
            warnings.push(format!("templates.{} has empty content and will not be registered", name));
            continue;
        }
        for target in referenced_templates(&entry.content) {
            if !known.contains(&target) {
                warnings.push(format!(
                    "templates.{} includes unknown template '{}'",
                    name, target
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        let mut config = Config::default();
        config.relay.default_channel = "1000".to_string();
        config.patterns.enabled = true;
        config.patterns.patterns = vec![PatternRule {
            replacement: "Backup $1".to_string(),
            ..PatternRule::new(r"Backup #(\d+)")
        }];
        config.templates.templates.insert(
            "greeting".to_string(),
            TemplateEntry {
                content: "Hi %n%".to_string(),
                description: String::new(),
            },
        );
        config
    }

    #[test]
    fn test_valid_config_passes() {
        let warnings = validate_config(&make_valid_config()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_default_channel_fails() {
        let mut config = make_valid_config();
        config.relay.default_channel = " ".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("relay.default_channel"));
    }

    #[test]
    fn test_empty_channel_id_fails() {
        let mut config = make_valid_config();
        config.patterns.patterns[0].channel_id = String::new();

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("channelID"));
    }

    #[test]
    fn test_invalid_regex_is_warning() {
        let mut config = make_valid_config();
        config.patterns.patterns.push(PatternRule::new("[invalid"));

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not a valid regex"));
    }

    #[test]
    fn test_invalid_color_is_warning() {
        let mut config = make_valid_config();
        config.patterns.patterns[0].as_embed = true;
        config.patterns.patterns[0].embed_color = "purple".to_string();

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.contains("gray")));
    }

    #[test]
    fn test_unknown_include_is_warning() {
        let mut config = make_valid_config();
        config.templates.templates.insert(
            "card".to_string(),
            TemplateEntry {
                content: "{include Greeting} {include footer}".to_string(),
                description: String::new(),
            },
        );

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'footer'"));
    }
}
