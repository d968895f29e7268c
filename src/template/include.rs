//! `{include name}` expansion.

use std::sync::LazyLock;

use fancy_regex::Regex;
use tracing::warn;

use crate::common::error::TemplateError;
use crate::template::registry::{Template, TemplateMap};
use crate::template::rewrite::{group, rewrite};

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{include\s+([^}]+)\}").expect("include regex"));

/// Splice registered templates into `text`.
///
/// `render` produces the fully processed content of an included template;
/// `chain` holds the (lower-cased) names currently being expanded. A name
/// already on the chain, or one that is not registered, leaves its token
/// as literal text.
pub(crate) fn expand_includes<F>(
    text: &str,
    templates: &TemplateMap,
    chain: &mut Vec<String>,
    mut render: F,
) -> String
where
    F: FnMut(&str, &mut Vec<String>) -> String,
{
    if !text.contains("{include") {
        return text.to_string();
    }

    rewrite(&INCLUDE_RE, text, |caps| {
        let name = group(caps, 1).trim().to_lowercase();
        match resolve_include(&name, templates, chain) {
            Ok(template) => {
                chain.push(name);
                let rendered = render(template.content(), chain);
                chain.pop();
                rendered
            }
            Err(e) => {
                warn!(template = %name, "{}", e);
                group(caps, 0).to_string()
            }
        }
    })
}

fn resolve_include<'a>(
    name: &str,
    templates: &'a TemplateMap,
    chain: &[String],
) -> Result<&'a Template, TemplateError> {
    if chain.iter().any(|active| active == name) {
        let mut path = chain.to_vec();
        path.push(name.to_string());
        return Err(TemplateError::IncludeCycle {
            chain: path.join(" -> "),
        });
    }

    templates
        .get(name)
        .ok_or_else(|| TemplateError::UnknownTemplate {
            name: name.to_string(),
        })
}

/// Names referenced by `{include}` tokens in `text`, lower-cased.
pub fn referenced_templates(text: &str) -> Vec<String> {
    INCLUDE_RE
        .captures_iter(text)
        .filter_map(Result::ok)
        .map(|caps| group(&caps, 1).trim().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_templates(pairs: &[(&str, &str)]) -> TemplateMap {
        pairs
            .iter()
            .map(|(name, content)| (name.to_lowercase(), Template::new(*name, *content)))
            .collect()
    }

    fn expand_raw(text: &str, templates: &TemplateMap) -> String {
        fn go(text: &str, templates: &TemplateMap, chain: &mut Vec<String>) -> String {
            expand_includes(text, templates, chain, |content, chain| go(content, templates, chain))
        }
        go(text, templates, &mut Vec::new())
    }

    #[test]
    fn test_include_found() {
        let templates = make_templates(&[("greeting", "Hello!")]);
        assert_eq!(expand_raw("{include greeting} Welcome", &templates), "Hello! Welcome");
    }

    #[test]
    fn test_include_name_trimmed_and_case_insensitive() {
        let templates = make_templates(&[("Greeting", "Hi")]);
        assert_eq!(expand_raw("{include  GREETING }", &templates), "Hi");
    }

    #[test]
    fn test_unknown_include_left_verbatim() {
        let templates = TemplateMap::new();
        assert_eq!(expand_raw("a {include nope} b", &templates), "a {include nope} b");
    }

    #[test]
    fn test_nested_includes() {
        let templates = make_templates(&[("header", "=== H ==="), ("message", "{include header}\nbody")]);
        assert_eq!(expand_raw("{include message}", &templates), "=== H ===\nbody");
    }

    #[test]
    fn test_repeated_include_is_not_a_cycle() {
        let templates = make_templates(&[("dot", "."), ("pair", "{include dot}{include dot}")]);
        assert_eq!(expand_raw("{include pair}{include pair}", &templates), "....");
    }

    #[test]
    fn test_self_include_stops() {
        let templates = make_templates(&[("loop", "x{include loop}")]);
        assert_eq!(expand_raw("{include loop}", &templates), "x{include loop}");
    }

    #[test]
    fn test_mutual_include_stops() {
        let templates = make_templates(&[("a", "A{include b}"), ("b", "B{include a}")]);
        assert_eq!(expand_raw("{include a}", &templates), "AB{include a}");
    }

    #[test]
    fn test_cycle_error_names_chain() {
        let templates = make_templates(&[("a", "")]);
        let chain = vec!["a".to_string(), "b".to_string()];
        let err = resolve_include("a", &templates, &chain).unwrap_err();
        assert_eq!(
            err,
            TemplateError::IncludeCycle {
                chain: "a -> b -> a".to_string()
            }
        );
    }

    #[test]
    fn test_referenced_templates() {
        assert_eq!(
            referenced_templates("{include Header} and {include  footer }"),
            vec!["header".to_string(), "footer".to_string()]
        );
        assert!(referenced_templates("no includes").is_empty());
    }
}
