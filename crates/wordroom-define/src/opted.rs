use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::{DefineError, Definition, DefinitionProvider, Lookup, ProviderMetadata};

pub const OPTED_ATTRIBUTION: &str =
    "from The Online Plain Text English Dictionary, Public Domain.";
pub const OPTED_URL: &str = "http://www.mso.anu.edu.au/%7Eralph/OPTED/index.html";
pub const MISSING_FILES_MESSAGE: &str = "WordRoom couldn't load the offline dictionary. \
    Check that all of the dictionary files were downloaded.";

type LetterIndex = HashMap<String, Vec<Definition>>;

#[derive(Debug, thiserror::Error)]
pub enum OptedError {
    #[error("Could not read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed dictionary file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The OPTED dictionary, split into one JSON file per initial letter.
///
/// Files are read the first time a letter is needed and kept for the
/// lifetime of the dictionary, including letters whose file failed to load.
pub struct OfflineDictionary {
    dir: PathBuf,
    cache: Mutex<HashMap<char, LetterIndex>>,
}

impl OfflineDictionary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up a word. Never fails; problems show up in `messages`.
    pub fn lookup(&self, word: &str) -> Lookup {
        let mut lookup = Lookup::empty(word);

        let Some(letter) = index_letter(word) else {
            return lookup;
        };

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let index = cache.entry(letter).or_insert_with(|| {
            self.load_letter(letter).unwrap_or_else(|e| {
                tracing::warn!("Failed to load offline dictionary for '{}': {}", letter, e);
                lookup.messages.push(MISSING_FILES_MESSAGE.to_string());
                LetterIndex::new()
            })
        });

        if let Some(definitions) = index.get(word) {
            lookup.definitions = definitions.clone();
        }

        if lookup.has_definitions() {
            lookup.attribution = OPTED_ATTRIBUTION.to_string();
            lookup.attribution_url = OPTED_URL.to_string();
        }

        lookup
    }

    fn load_letter(&self, letter: char) -> Result<LetterIndex, OptedError> {
        let path = self.dir.join(format!("{letter}.json"));
        tracing::info!("Loading offline dictionary file: {}", path.display());
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(source) => return Err(OptedError::Io { path, source }),
        };
        let index: LetterIndex = match serde_json::from_str(&json) {
            Ok(index) => index,
            Err(source) => return Err(OptedError::Malformed { path, source }),
        };
        tracing::info!("Loaded {} offline entries for '{}'", index.len(), letter);
        Ok(index)
    }
}

/// First ASCII letter of the word once everything else is stripped, lowercased.
fn index_letter(word: &str) -> Option<char> {
    word.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
}

#[async_trait]
impl DefinitionProvider for OfflineDictionary {
    async fn define(&self, word: &str) -> Result<Lookup, DefineError> {
        Ok(self.lookup(word))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OPTED".to_string(),
            requires_api_key: false,
            online: false,
        }
    }
}
