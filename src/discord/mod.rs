//! Discord delivery helpers.
//!
//! Converts replacement messages into serenity builders. Sending them is
//! left to whichever client owns the gateway connection.

pub mod embed;

pub use embed::{resolve_channel_id, to_create_message, to_embed};
