//! Herald - console line classifier and message templating for chat relays.
//!
//! Lines are matched against prioritized regex rules that can suppress the
//! original, produce a plain or embed replacement, and route it to another
//! channel. Replacement text can use a small template language with
//! variables, conditionals and reusable fragments.

pub mod bridge;
pub mod common;
pub mod config;
pub mod discord;
pub mod pattern;
pub mod template;
