//! Regex-driven line classification.
//!
//! ## Module Structure
//!
//! - `compiler`: Rule list -> compiled, priority-ordered snapshot
//! - `matcher`: First-match-wins scanning with atomic snapshot reload
//! - `decision`: The match/no-match value and its helper queries
//! - `captures`: Immutable group snapshot and `$n` expansion
//! - `builder`: Replacement message construction (plain or embed)
//! - `color`: `#RRGGBB` parsing

pub mod builder;
pub mod captures;
pub mod color;
pub mod compiler;
pub mod decision;
pub mod matcher;

pub use builder::{build_replacement, build_with_fields, ReplacementFields};
pub use captures::{escape_group_refs, CaptureSnapshot};
pub use compiler::{compile_config, compile_rules, CompiledPattern, CompiledPatterns};
pub use decision::{MatchDecision, PatternMatch};
pub use matcher::PatternMatcher;
