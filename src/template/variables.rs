//! `%name%` and `%name|default%` substitution.
//!
//! Unresolved names erase to the empty string. Compare
//! [`crate::template::placeholder`], which leaves unknown tokens alone.

use std::sync::LazyLock;

use fancy_regex::Regex;

use crate::common::types::Variables;
use crate::template::rewrite::{group, rewrite};

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([^%|]+)(?:\|([^%]+))?%").expect("variable regex"));

/// Resolve every variable token in `text`.
///
/// A missing or empty value falls back to the token's default, or to `""`
/// when there is none.
pub fn substitute_variables(text: &str, variables: &Variables) -> String {
    if !text.contains('%') {
        return text.to_string();
    }

    rewrite(&VARIABLE_RE, text, |caps| {
        let name = group(caps, 1).trim();
        match variables.get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => caps.get(2).map_or_else(String::new, |d| d.as_str().to_string()),
        }
    })
}
