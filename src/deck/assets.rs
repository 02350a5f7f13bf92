use rust_embed::Embed;

use crate::deck::DeckError;
use crate::deck::parser::{DeckFormat, parse_deck_str};
use crate::deck::topic::TopicIndex;

#[derive(Embed)]
#[folder = "assets/decks/"]
struct DeckAssets;

pub const DEMO_DECK: &str = "demo";

/// Parses a bundled deck. Bundled decks always use the default delimiters.
pub fn load_bundled(name: &str) -> Result<TopicIndex, DeckError> {
    let file = DeckAssets::get(&format!("{name}.txt"))
        .ok_or_else(|| DeckError::UnknownBundledDeck(name.to_string()))?;
    let content = std::str::from_utf8(file.data.as_ref())
        .map_err(|_| DeckError::UnknownBundledDeck(name.to_string()))?;
    parse_deck_str(content, &DeckFormat::default())
}
