use std::collections::BTreeMap;

use crate::deck::SelectionError;
use crate::deck::bank::QuestionBank;

/// Question banks keyed by topic id (a lesson number, a chapter name...).
///
/// Banks live in a `BTreeMap` so that `get_or_create` hands out a mutable
/// borrow of the stored bank itself, and so that "all topics" aggregation
/// walks ids in sorted order.
#[derive(Clone, Debug, Default)]
pub struct TopicIndex {
    topics: BTreeMap<String, QuestionBank>,
    languages: Option<DeckLanguages>,
}

/// Languages named by a deck's `#native;learnt` header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckLanguages {
    pub native: String,
    pub learnt: String,
}

impl TopicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bank stored under `id`, storing an empty one first if
    /// the topic is unknown.
    pub fn get_or_create(&mut self, id: &str) -> &mut QuestionBank {
        self.topics.entry(id.to_string()).or_default()
    }

    pub fn set_languages(&mut self, languages: DeckLanguages) {
        self.languages = Some(languages);
    }

    pub fn languages(&self) -> Option<&DeckLanguages> {
        self.languages.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&QuestionBank> {
        self.topics.get(id)
    }

    /// Topic ids, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.topics.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.topics.values().map(QuestionBank::count).sum()
    }

    /// Flattens the named topics, in the given order, into one bank. With no
    /// ids every topic is used, sorted by id. Unknown ids contribute nothing
    /// but are registered as empty topics.
    pub fn build_flat_set<S: AsRef<str>>(&mut self, ids: &[S]) -> QuestionBank {
        let mut flat = QuestionBank::new();
        if ids.is_empty() {
            log::debug!("no topic requested, using all {} topics", self.len());
            flat.concatenate(self.topics.values());
            return flat;
        }
        for id in ids {
            let bank = self.get_or_create(id.as_ref());
            flat.concatenate([&*bank]);
        }
        flat
    }

    /// Maps lesson numbers onto topic ids whose text is that number, so
    /// `"01"` and `"1"` both answer to lesson 1. Order and repeats of
    /// `numbers` are preserved.
    pub fn resolve_lessons(&self, numbers: &[u32]) -> Result<Vec<String>, SelectionError> {
        let mut ids = Vec::with_capacity(numbers.len());
        let mut unknown = Vec::new();
        for &n in numbers {
            let found = self
                .topics
                .keys()
                .find(|id| id.trim().parse::<u32>().ok() == Some(n));
            match found {
                Some(id) => ids.push(id.clone()),
                None => {
                    if !unknown.contains(&n) {
                        unknown.push(n);
                    }
                }
            }
        }
        if !unknown.is_empty() {
            return Err(SelectionError::UnknownLessons(unknown));
        }
        Ok(ids)
    }
}
