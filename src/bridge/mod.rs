//! Line relay: classification, replacement, and routing for console output.
//!
//! ## Module Structure
//!
//! - `relay`: Per-line orchestration (`Relay` struct) and reload
//! - `stream`: Async driver that relays a line stream to JSON outcomes

pub mod relay;
pub mod stream;

pub use relay::Relay;
pub use stream::run_lines;

pub use crate::common::{RelayOutcome, RoutedReplacement};
