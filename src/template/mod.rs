//! Template language and placeholder formatting.
//!
//! ## Module Structure
//!
//! - `engine`: Include -> conditional -> variable pipeline
//! - `registry`: Case-insensitive named templates with snapshot reads
//! - `include`: `{include name}` expansion with a cycle guard
//! - `conditional`: `{if}` / `{ifnot}` fixed-point resolution
//! - `variables`: `%name|default%` substitution (unknown names erase)
//! - `placeholder`: `%name%` filling (unknown names stay)

pub mod conditional;
pub mod engine;
pub mod include;
pub mod placeholder;
pub mod registry;
mod rewrite;
pub mod variables;

pub use conditional::{evaluate_condition, resolve_conditionals};
pub use engine::TemplateEngine;
pub use placeholder::{replace_placeholders, replace_placeholders_opt};
pub use registry::{Template, TemplateRegistry};
pub use variables::substitute_variables;
