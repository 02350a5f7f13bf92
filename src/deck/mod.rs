pub mod assets;
pub mod bank;
pub mod parser;
pub mod selection;
pub mod topic;

pub use bank::QuestionBank;
pub use parser::DeckFormat;
pub use topic::{DeckLanguages, TopicIndex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("topic announce and question/answer separator must not be empty")]
    EmptyDelimiter,
    #[error("line {line}: no question/answer separator in {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("no bundled deck named {0:?}")]
    UnknownBundledDeck(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("invalid lesson series {0:?}: expected numbers joined by ',' or ':'")]
    InvalidSeries(String),
    #[error("lesson series {series:?} expands to more than {max} lessons")]
    SeriesTooLong { series: String, max: usize },
    #[error("no topic found for lessons {0:?}")]
    UnknownLessons(Vec<u32>),
}
