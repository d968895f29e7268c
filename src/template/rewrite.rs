//! Match-by-match text rewriting shared by the template passes.

use fancy_regex::{Captures, Regex};
use tracing::warn;

/// Replace every match of `re` in `text` with the output of `replace`.
///
/// Text between matches is copied through untouched. If the regex engine
/// fails part-way, the rest of the input is kept verbatim.
pub(crate) fn rewrite<F>(re: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(e) => {
                warn!("Template scan stopped early: {}", e);
                break;
            }
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps));
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Group `i` as a string slice, or `""` if it did not participate.
pub(crate) fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}
