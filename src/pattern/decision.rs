//! Outcome of matching one message against the rule list.

use std::sync::Arc;

use crate::config::types::PatternRule;
use crate::pattern::captures::CaptureSnapshot;

/// A successful match: the winning rule, the message, and its groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    rule: Arc<PatternRule>,
    original_message: String,
    captures: CaptureSnapshot,
}

impl PatternMatch {
    pub fn new(rule: Arc<PatternRule>, original_message: impl Into<String>, captures: CaptureSnapshot) -> Self {
        Self {
            rule,
            original_message: original_message.into(),
            captures,
        }
    }

    pub fn rule(&self) -> &PatternRule {
        &self.rule
    }

    pub fn original_message(&self) -> &str {
        &self.original_message
    }

    pub fn captures(&self) -> &CaptureSnapshot {
        &self.captures
    }
}

/// Either no rule matched, or one rule matched with all its data present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchDecision {
    #[default]
    NoMatch,
    Matched(PatternMatch),
}

impl MatchDecision {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchDecision::Matched(_))
    }

    /// The match details, if any.
    pub fn as_match(&self) -> Option<&PatternMatch> {
        match self {
            MatchDecision::Matched(m) => Some(m),
            MatchDecision::NoMatch => None,
        }
    }

    pub fn rule(&self) -> Option<&PatternRule> {
        self.as_match().map(PatternMatch::rule)
    }

    pub fn original_message(&self) -> Option<&str> {
        self.as_match().map(PatternMatch::original_message)
    }

    pub fn captures(&self) -> Option<&CaptureSnapshot> {
        self.as_match().map(PatternMatch::captures)
    }

    /// True iff matched and the rule asks to suppress the original line.
    pub fn should_suppress_original(&self) -> bool {
        self.rule().is_some_and(|r| r.suppress_original)
    }

    /// True iff matched and the rule would produce some output.
    ///
    /// Plain rules need a non-empty `replacement`; embed rules need a title
    /// or a description.
    pub fn has_replacement(&self) -> bool {
        self.rule().is_some_and(|r| {
            !r.replacement.is_empty()
                || (r.as_embed && (!r.embed_title.is_empty() || !r.embed_description.is_empty()))
        })
    }

    /// Channel the replacement should go to.
    ///
    /// The `"default"` sentinel (and an unmatched decision) keep
    /// `original_channel`.
    pub fn target_channel<'a>(&'a self, original_channel: &'a str) -> &'a str {
        match self.rule() {
            Some(rule) if !rule.uses_default_channel() => &rule.channel_id,
            _ => original_channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(rule: PatternRule) -> MatchDecision {
        let snap = CaptureSnapshot::from_groups(vec![Some("line".to_string())]);
        MatchDecision::Matched(PatternMatch::new(Arc::new(rule), "line", snap))
    }

    #[test]
    fn test_no_match_has_nothing() {
        let decision = MatchDecision::NoMatch;
        assert!(!decision.is_matched());
        assert!(decision.rule().is_none());
        assert!(decision.original_message().is_none());
        assert!(decision.captures().is_none());
        assert!(!decision.should_suppress_original());
        assert!(!decision.has_replacement());
        assert_eq!(decision.target_channel("orig"), "orig");
    }

    #[test]
    fn test_suppress_flag() {
        let mut rule = PatternRule::new("x");
        assert!(!matched(rule.clone()).should_suppress_original());
        rule.suppress_original = true;
        assert!(matched(rule).should_suppress_original());
    }

    #[test]
    fn test_has_replacement_plain() {
        let mut rule = PatternRule::new("x");
        assert!(!matched(rule.clone()).has_replacement());
        rule.replacement = "r".to_string();
        assert!(matched(rule).has_replacement());
    }

    #[test]
    fn test_has_replacement_embed() {
        let mut rule = PatternRule::new("x");
        rule.embed_title = "t".to_string();
        // Title alone doesn't count outside embed mode.
        assert!(!matched(rule.clone()).has_replacement());
        rule.as_embed = true;
        assert!(matched(rule.clone()).has_replacement());
        rule.embed_title.clear();
        rule.embed_description = "d".to_string();
        assert!(matched(rule.clone()).has_replacement());
        rule.embed_description.clear();
        assert!(!matched(rule).has_replacement());
    }

    #[test]
    fn test_target_channel() {
        let mut rule = PatternRule::new("x");
        assert_eq!(matched(rule.clone()).target_channel("orig"), "orig");
        rule.channel_id = "123456789".to_string();
        assert_eq!(matched(rule).target_channel("orig"), "123456789");
    }

    #[test]
    fn test_matched_exposes_message() {
        let decision = matched(PatternRule::new("x"));
        assert_eq!(decision.original_message(), Some("line"));
        assert_eq!(decision.rule().map(|r| r.pattern.as_str()), Some("x"));
    }
}
