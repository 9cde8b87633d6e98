//! Parsers for Obsidian markdown syntax.

pub mod embed;

pub use embed::{parse_embeds, Embed};
