use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type WordMap = BTreeMap<String, String>;

/// One of the two persistent partitions of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Notes,
    History,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Notes, Section::History];

    /// Where a word with these notes belongs.
    pub fn for_notes(notes: &str) -> Self {
        if notes.is_empty() {
            Section::History
        } else {
            Section::Notes
        }
    }

    pub fn other(self) -> Self {
        match self {
            Section::Notes => Section::History,
            Section::History => Section::Notes,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Notes => "Words with notes",
            Section::History => "Words from history",
        }
    }
}

/// Notes and history, stored on disk as `[notes, history]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(WordMap, WordMap)", into = "(WordMap, WordMap)")]
pub struct Words {
    pub notes: WordMap,
    pub history: WordMap,
}

impl From<(WordMap, WordMap)> for Words {
    fn from((notes, history): (WordMap, WordMap)) -> Self {
        Self { notes, history }
    }
}

impl From<Words> for (WordMap, WordMap) {
    fn from(words: Words) -> Self {
        (words.notes, words.history)
    }
}

impl Words {
    pub fn get(&self, section: Section) -> &WordMap {
        match section {
            Section::Notes => &self.notes,
            Section::History => &self.history,
        }
    }

    pub fn get_mut(&mut self, section: Section) -> &mut WordMap {
        match section {
            Section::Notes => &mut self.notes,
            Section::History => &mut self.history,
        }
    }

    /// Section currently holding `word`, notes first.
    pub fn section_of(&self, word: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|section| self.get(*section).contains_key(word))
    }

    pub fn len(&self) -> usize {
        self.notes.len() + self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.history.is_empty()
    }

    /// Drop history entries that also have notes. Returns how many were dropped.
    pub fn dedupe(&mut self) -> usize {
        let before = self.history.len();
        let notes = &self.notes;
        self.history.retain(|word, _| !notes.contains_key(word));
        before - self.history.len()
    }
}
