//! Replacement message -> serenity builders.

use serenity::all::{ChannelId, Colour, CreateEmbed, CreateMessage};

use crate::common::types::{ReplacementMessage, Rgb};

impl From<Rgb> for Colour {
    fn from(rgb: Rgb) -> Self {
        Colour::from_rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Build the embed part of a replacement, if it has one.
pub fn to_embed(message: &ReplacementMessage) -> Option<CreateEmbed> {
    if !message.is_embed() {
        return None;
    }

    let mut embed = CreateEmbed::new().colour(Colour::from(message.color.unwrap_or(Rgb::GRAY)));
    if let Some(title) = &message.title {
        embed = embed.title(title);
    }
    if let Some(description) = &message.description {
        embed = embed.description(description);
    }
    Some(embed)
}

/// Build a sendable message: plain text, an embed, or both.
pub fn to_create_message(message: &ReplacementMessage) -> CreateMessage {
    let mut builder = CreateMessage::new();
    if !message.plain_text.is_empty() {
        builder = builder.content(&message.plain_text);
    }
    if let Some(embed) = to_embed(message) {
        builder = builder.embed(embed);
    }
    builder
}

/// Parse a routed channel string into a Discord channel id.
///
/// Only non-zero numeric snowflakes qualify; names like `console` return
/// `None` and are left to the caller.
pub fn resolve_channel_id(channel: &str) -> Option<ChannelId> {
    match channel.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(ChannelId::new(id)),
    }
}
