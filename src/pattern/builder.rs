//! Replacement message construction.
//!
//! Turns a matched decision into the message the transport should send.
//! Bad colors and oversized fields degrade (gray, truncation); a failed
//! group substitution drops the replacement entirely.

use tracing::{debug, error, warn};

use crate::common::error::SubstitutionError;
use crate::common::types::{ReplacementMessage, Rgb};
use crate::config::types::PatternRule;
use crate::pattern::captures::CaptureSnapshot;
use crate::pattern::color::parse_hex_color;
use crate::pattern::decision::MatchDecision;

/// Discord limit for embed titles, in characters.
pub const MAX_TITLE_LEN: usize = 256;

/// Discord limit for embed descriptions, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Rule text that goes through group expansion.
///
/// Normally this is the rule's own text. Callers that preprocess it (for
/// example with the template engine) pass their version to
/// [`build_with_fields`]; group references are always expanded last, so
/// text captured from the message is never reinterpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementFields {
    pub replacement: String,
    pub embed_title: String,
    pub embed_description: String,
}

impl ReplacementFields {
    pub fn from_rule(rule: &PatternRule) -> Self {
        Self {
            replacement: rule.replacement.clone(),
            embed_title: rule.embed_title.clone(),
            embed_description: rule.embed_description.clone(),
        }
    }
}

/// Build the replacement for a decision.
///
/// Returns `None` when the decision didn't match, has nothing to send, or
/// substitution failed. Callers treat all three the same way.
pub fn build_replacement(decision: &MatchDecision) -> Option<ReplacementMessage> {
    let fields = ReplacementFields::from_rule(decision.rule()?);
    build_with_fields(decision, &fields)
}

/// Build the replacement for a decision from already prepared field text.
pub fn build_with_fields(
    decision: &MatchDecision,
    fields: &ReplacementFields,
) -> Option<ReplacementMessage> {
    let matched = decision.as_match()?;
    if !decision.has_replacement() {
        return None;
    }

    let rule = matched.rule();
    if rule.as_embed {
        if fields.embed_title.is_empty() && fields.embed_description.is_empty() {
            warn!(pattern = %rule.pattern, "Embed pattern has no title or description, nothing to send");
            return None;
        }
    } else if fields.replacement.is_empty() {
        debug!(pattern = %rule.pattern, "Replacement text is empty, nothing to send");
        return None;
    }

    match build_for_rule(rule, fields, matched.captures()) {
        Ok(message) => Some(message),
        Err(e) => {
            error!(
                pattern = %rule.pattern,
                "Error building replacement message from pattern: {}", e
            );
            None
        }
    }
}

fn build_for_rule(
    rule: &PatternRule,
    fields: &ReplacementFields,
    captures: &CaptureSnapshot,
) -> Result<ReplacementMessage, SubstitutionError> {
    if !rule.as_embed {
        return Ok(ReplacementMessage::plain(captures.expand(&fields.replacement)?));
    }

    let color = parse_hex_color(&rule.embed_color).unwrap_or_else(|e| {
        warn!("{} in pattern, using default gray", e);
        Rgb::GRAY
    });

    let title = non_empty(&fields.embed_title)
        .map(|t| captures.expand(t))
        .transpose()?
        .map(clamp_title);
    let description = non_empty(&fields.embed_description)
        .map(|d| captures.expand(d))
        .transpose()?
        .map(clamp_description);

    Ok(ReplacementMessage {
        plain_text: String::new(),
        title,
        description,
        color: Some(color),
    })
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Truncate an embed title to [`MAX_TITLE_LEN`] characters.
pub fn clamp_title(title: String) -> String {
    clamp(title, MAX_TITLE_LEN, "title")
}

/// Truncate an embed description to [`MAX_DESCRIPTION_LEN`] characters.
pub fn clamp_description(description: String) -> String {
    clamp(description, MAX_DESCRIPTION_LEN, "description")
}

fn clamp(mut text: String, max_chars: usize, field: &str) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        warn!(
            "Pattern embed {} exceeds {} character limit, truncating",
            field, max_chars
        );
        text.truncate(byte_index);
    }
    text
}
