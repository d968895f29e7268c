//! Plain `%name%` placeholder filling.
//!
//! Only known keys are replaced; an unknown `%token%` stays in the output
//! as written. No defaults, conditionals or includes.

use std::sync::LazyLock;

use fancy_regex::Regex;
use tracing::debug;

use crate::common::types::Variables;
use crate::template::rewrite::{group, rewrite};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_.\-]+)%").expect("placeholder regex"));

/// Fill known placeholders in `format`.
pub fn replace_placeholders(format: &str, placeholders: &Variables) -> String {
    if !format.contains('%') {
        return format.to_string();
    }

    rewrite(&PLACEHOLDER_RE, format, |caps| {
        let name = group(caps, 1);
        match placeholders.get(name) {
            Some(value) => value.clone(),
            None => {
                debug!("Unknown placeholder %{}%, leaving as-is", name);
                group(caps, 0).to_string()
            }
        }
    })
}

/// Like [`replace_placeholders`], passing `None` through.
pub fn replace_placeholders_opt(format: Option<&str>, placeholders: &Variables) -> Option<String> {
    format.map(|f| replace_placeholders(f, placeholders))
}
