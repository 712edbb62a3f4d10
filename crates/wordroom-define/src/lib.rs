pub mod definer;
pub mod opted;
pub mod wordnik;

use serde::{Deserialize, Serialize};

pub use definer::Definer;
pub use opted::{OfflineDictionary, OptedError};
pub use wordnik::WordnikProvider;

/// Definition provider interface
#[async_trait::async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Look up a word
    async fn define(&self, word: &str) -> Result<Lookup, DefineError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "partOfSpeech", alias = "partofspeech", default)]
    pub part_of_speech: String,
}

/// Everything the word view shows for one lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookup {
    pub word: String,
    pub definitions: Vec<Definition>,
    pub attribution: String,
    pub attribution_url: String,
    pub suggestions: Vec<String>,
    /// User-facing notices, e.g. that the offline dictionary is in use
    pub messages: Vec<String>,
}

impl Lookup {
    pub fn empty(word: &str) -> Self {
        Self {
            word: word.to_string(),
            ..Self::default()
        }
    }

    /// Only words with definitions get saved to history.
    pub fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub online: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DefineError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
