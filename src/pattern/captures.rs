//! Immutable capture-group snapshot and `$n` expansion.
//!
//! Group values are copied out of the regex match once, at match time, so any
//! number of fields can be expanded against the same snapshot independently.

use std::collections::HashMap;
use std::sync::Arc;

use fancy_regex::Captures;

use crate::common::error::SubstitutionError;

/// Capture groups of one successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSnapshot {
    /// Group values; index 0 is the whole match. `None` for groups that did
    /// not participate.
    groups: Vec<Option<String>>,
    /// Named group -> index.
    names: Arc<HashMap<String, usize>>,
    /// Byte offset of the match start in the original message.
    start: usize,
    /// Byte offset of the match end in the original message.
    end: usize,
}

impl CaptureSnapshot {
    /// Copy the groups out of a regex match.
    pub fn from_captures(caps: &Captures<'_>, names: Arc<HashMap<String, usize>>) -> Self {
        let (start, end) = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
        let groups = (0..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect();

        Self {
            groups,
            names,
            start,
            end,
        }
    }

    /// Build a snapshot directly from group values (index 0 = whole match).
    pub fn from_groups(groups: Vec<Option<String>>) -> Self {
        let end = groups
            .first()
            .and_then(|g| g.as_ref())
            .map(|g| g.len())
            .unwrap_or(0);
        Self {
            groups,
            names: Arc::new(HashMap::new()),
            start: 0,
            end,
        }
    }

    /// Number of capturing groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Value of group `index`, if it participated in the match.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Value of a named group, if it exists and participated.
    pub fn named(&self, name: &str) -> Option<&str> {
        self.names.get(name).and_then(|&i| self.group(i))
    }

    /// Byte span of the whole match within the original message.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Substitute group references in `template`.
    ///
    /// - `$n` inserts group `n`. Extra digits are consumed only while the
    ///   number still names an existing group, so `$10` with one group is
    ///   group 1 followed by a literal `0`.
    /// - `${name}` inserts a named group.
    /// - `\x` inserts `x` literally.
    /// - A `$` followed by anything else is kept as-is.
    ///
    /// Groups that did not participate expand to the empty string.
    pub fn expand(&self, template: &str) -> Result<String, SubstitutionError> {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(SubstitutionError::TrailingEscape),
                },
                '$' => match chars.peek().copied() {
                    Some('{') => {
                        chars.next();
                        let mut name = String::new();
                        loop {
                            match chars.next() {
                                Some('}') => break,
                                Some(ch) => name.push(ch),
                                None => return Err(SubstitutionError::UnterminatedGroupName),
                            }
                        }
                        let index = *self
                            .names
                            .get(&name)
                            .ok_or(SubstitutionError::NoSuchNamedGroup { name })?;
                        out.push_str(self.group(index).unwrap_or(""));
                    }
                    Some(d) if d.is_ascii_digit() => {
                        chars.next();
                        let mut index = digit_value(d);
                        if index > self.group_count() {
                            return Err(SubstitutionError::NoSuchGroup { index });
                        }
                        while let Some(next) = chars.peek().copied().filter(char::is_ascii_digit) {
                            let candidate = index * 10 + digit_value(next);
                            if candidate > self.group_count() {
                                break;
                            }
                            index = candidate;
                            chars.next();
                        }
                        out.push_str(self.group(index).unwrap_or(""));
                    }
                    _ => out.push('$'),
                },
                _ => out.push(c),
            }
        }

        Ok(out)
    }
}

/// Escape `text` so that [`CaptureSnapshot::expand`] reproduces it verbatim.
pub fn escape_group_refs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == '$' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn digit_value(c: char) -> usize {
    c.to_digit(10).unwrap_or(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(groups: &[Option<&str>]) -> CaptureSnapshot {
        CaptureSnapshot::from_groups(groups.iter().map(|g| g.map(String::from)).collect())
    }

    #[test]
    fn test_expand_numbered_groups() {
        let snap = snapshot(&[Some("Backup #11 completed in 1.2s"), Some("11"), Some("1.2")]);
        assert_eq!(snap.expand("Backup #$1 Completed").unwrap(), "Backup #11 Completed");
        assert_eq!(snap.expand("Duration: $2 seconds").unwrap(), "Duration: 1.2 seconds");
        assert_eq!(snap.expand("$0").unwrap(), "Backup #11 completed in 1.2s");
    }

    #[test]
    fn test_expand_is_repeatable() {
        let snap = snapshot(&[Some("ab"), Some("a"), Some("b")]);
        let first = snap.expand("$2$1").unwrap();
        let second = snap.expand("$2$1").unwrap();
        assert_eq!(first, "ba");
        assert_eq!(first, second);
    }

    #[test]
    fn test_greedy_digits_stop_at_group_count() {
        let snap = snapshot(&[Some("x"), Some("x")]);
        assert_eq!(snap.expand("$10").unwrap(), "x0");
    }

    #[test]
    fn test_missing_group_is_error() {
        let snap = snapshot(&[Some("x"), Some("x")]);
        assert_eq!(
            snap.expand("$3").unwrap_err(),
            SubstitutionError::NoSuchGroup { index: 3 }
        );
    }

    #[test]
    fn test_non_participating_group_is_empty() {
        let snap = snapshot(&[Some("a"), Some("a"), None]);
        assert_eq!(snap.expand("[$1][$2]").unwrap(), "[a][]");
    }

    #[test]
    fn test_escapes_and_literal_dollar() {
        let snap = snapshot(&[Some("5"), Some("5")]);
        assert_eq!(snap.expand(r"\$1 costs $$1").unwrap(), "$1 costs $5");
        assert_eq!(snap.expand("price: $ x").unwrap(), "price: $ x");
        assert_eq!(snap.expand("end$").unwrap(), "end$");
        assert_eq!(snap.expand("oops\\").unwrap_err(), SubstitutionError::TrailingEscape);
    }

    #[test]
    fn test_escaped_text_expands_verbatim() {
        let snap = snapshot(&[Some("x"), Some("x")]);
        let text = r"cost $1, ${id} and a \ backslash$";
        assert_eq!(snap.expand(&escape_group_refs(text)).unwrap(), text);
        assert_eq!(escape_group_refs("plain"), "plain");
    }

    #[test]
    fn test_named_groups() {
        let mut names = HashMap::new();
        names.insert("id".to_string(), 1);
        let snap = CaptureSnapshot {
            groups: vec![Some("#7".to_string()), Some("7".to_string())],
            names: Arc::new(names),
            start: 0,
            end: 2,
        };
        assert_eq!(snap.named("id"), Some("7"));
        assert_eq!(snap.expand("id=${id}").unwrap(), "id=7");
        assert!(matches!(
            snap.expand("${nope}"),
            Err(SubstitutionError::NoSuchNamedGroup { .. })
        ));
        assert_eq!(
            snap.expand("${id").unwrap_err(),
            SubstitutionError::UnterminatedGroupName
        );
    }
}
