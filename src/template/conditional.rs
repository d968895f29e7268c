//! `{if cond}...{/if}` and `{ifnot cond}...{/ifnot}` blocks.
//!
//! Each pass rewrites every non-overlapping block of both forms. Bodies are
//! matched lazily, so a nested block's inner `{/if}` closes its outer
//! opener on the first pass and the leftover pair resolves on the next one.
//! Passes repeat until the text stops changing or [`MAX_PASSES`] is hit.

use std::sync::LazyLock;

use fancy_regex::Regex;
use tracing::debug;

use crate::common::types::Variables;
use crate::template::rewrite::{group, rewrite};

/// Upper bound on resolution passes.
pub const MAX_PASSES: usize = 10;

static IF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{if\s+([^}]+)\}(.*?)\{/if\}").expect("if-block regex")
});

static IFNOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{ifnot\s+([^}]+)\}(.*?)\{/ifnot\}").expect("ifnot-block regex")
});

/// Resolve conditional blocks until a fixed point (or the pass cap).
pub fn resolve_conditionals(text: &str, variables: &Variables) -> String {
    let mut current = text.to_string();

    for pass in 1..=MAX_PASSES {
        let next = resolve_conditionals_once(&current, variables);
        if next == current {
            return next;
        }
        current = next;
        if pass == MAX_PASSES {
            debug!("Conditional resolution stopped after {} passes", MAX_PASSES);
        }
    }

    current
}

/// One pass: all `{if}` blocks, then all `{ifnot}` blocks.
pub fn resolve_conditionals_once(text: &str, variables: &Variables) -> String {
    if !text.contains('{') {
        return text.to_string();
    }

    let after_if = rewrite(&IF_RE, text, |caps| {
        if evaluate_condition(group(caps, 1), variables) {
            group(caps, 2).to_string()
        } else {
            String::new()
        }
    });

    rewrite(&IFNOT_RE, &after_if, |caps| {
        if evaluate_condition(group(caps, 1), variables) {
            String::new()
        } else {
            group(caps, 2).to_string()
        }
    })
}

/// Evaluate a block condition against `variables`.
///
/// - `key`: truthy unless the value is empty or one of `false`/`0`/`no`
///   (any case).
/// - `key == literal` / `key != literal`: string comparison, absent key
///   reads as `""`, one surrounding quote stripped from each end of the
///   literal.
/// - anything else: true iff a variable of that exact name is non-empty.
pub fn evaluate_condition(condition: &str, variables: &Variables) -> bool {
    let condition = condition.trim();

    if let Some(value) = variables.get(condition) {
        return is_truthy(value);
    }

    if let Some((name, literal)) = condition.split_once("==") {
        return lookup(variables, name) == strip_quotes(literal.trim());
    }

    if let Some((name, literal)) = condition.split_once("!=") {
        return lookup(variables, name) != strip_quotes(literal.trim());
    }

    variables.get(condition).is_some_and(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty()
        && !value.eq_ignore_ascii_case("false")
        && !value.eq_ignore_ascii_case("0")
        && !value.eq_ignore_ascii_case("no")
}

fn lookup<'a>(variables: &'a Variables, name: &str) -> &'a str {
    variables.get(name.trim()).map_or("", String::as_str)
}

fn strip_quotes(literal: &str) -> &str {
    let literal = literal
        .strip_prefix(['"', '\''])
        .unwrap_or(literal);
    literal.strip_suffix(['"', '\'']).unwrap_or(literal)
}
