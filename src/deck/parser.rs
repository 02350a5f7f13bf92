use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::deck::DeckError;
use crate::deck::topic::{DeckLanguages, TopicIndex};

pub const DEFAULT_TOPIC_ANNOUNCE: &str = "### ";
pub const DEFAULT_SEPARATOR: &str = ";";

/// Delimiters of the deck format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckFormat {
    /// Prefix of a line that opens a new topic; the rest of the line is its id.
    pub topic_announce: String,
    /// Separator between question and answer. Only the first occurrence splits.
    pub separator: String,
}

impl Default for DeckFormat {
    fn default() -> Self {
        Self {
            topic_announce: DEFAULT_TOPIC_ANNOUNCE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

pub fn parse_deck_file(path: &Path, format: &DeckFormat) -> Result<TopicIndex, DeckError> {
    let file = File::open(path)?;
    parse_deck(BufReader::new(file), format)
}

pub fn parse_deck_str(content: &str, format: &DeckFormat) -> Result<TopicIndex, DeckError> {
    parse_deck(content.as_bytes(), format)
}

pub fn parse_deck<R: BufRead>(reader: R, format: &DeckFormat) -> Result<TopicIndex, DeckError> {
    if format.topic_announce.is_empty() || format.separator.is_empty() {
        return Err(DeckError::EmptyDelimiter);
    }

    let mut index = TopicIndex::new();
    // Entries seen before the first announce land in the unnamed topic.
    let mut current_topic = String::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some(id) = line.strip_prefix(&format.topic_announce) {
            current_topic = id.trim().to_string();
            log::debug!("found topic {current_topic:?}");
            index.get_or_create(&current_topic);
            continue;
        }

        // Only the very first line may carry the `#native;learnt` header.
        if line_no == 0
            && let Some(header) = line.strip_prefix('#')
            && let Some((native, learnt)) = header.split_once(&format.separator)
        {
            log::debug!("deck languages {native:?} -> {learnt:?}");
            index.set_languages(DeckLanguages {
                native: native.trim().to_string(),
                learnt: learnt.trim().to_string(),
            });
            continue;
        }

        match line.split_once(&format.separator) {
            Some((question, answer)) => {
                index.get_or_create(&current_topic).add_entry(question, answer);
            }
            None if line.starts_with('#') => {}
            None => {
                return Err(DeckError::MalformedLine {
                    line: line_no + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    log::debug!(
        "parsed {} entries across {} topics",
        index.total_entries(),
        index.len()
    );
    Ok(index)
}
