use wordroom_config::Config;

use crate::{DefinitionProvider, Lookup, OfflineDictionary, WordnikProvider};

pub const OFFLINE_MESSAGE: &str = "WordRoom is using a limited offline dictionary.";
pub const API_KEY_MESSAGE: &str = "This app doesn't share its online API access. \
    You can get your own key from https://developer.wordnik.com/";
pub const SET_KEY_MESSAGE: &str = "Add an API key with `wordroom set-key <KEY>`.";
pub const CONNECT_MESSAGE: &str =
    "WordRoom couldn't connect to Wordnik.com to retrieve online definitions.";

/// Picks the online provider when one is configured and falls back to the
/// offline dictionary otherwise.
pub struct Definer {
    online: Option<Box<dyn DefinitionProvider>>,
    offline: OfflineDictionary,
}

impl Definer {
    pub fn new(online: Option<Box<dyn DefinitionProvider>>, offline: OfflineDictionary) -> Self {
        Self { online, offline }
    }

    /// Offline-only definer
    pub fn offline(offline: OfflineDictionary) -> Self {
        Self::new(None, offline)
    }

    pub fn from_config(config: &Config) -> Self {
        let offline = OfflineDictionary::new(config.offline.dir.clone());
        let online: Option<Box<dyn DefinitionProvider>> = if config.wordnik.enabled() {
            Some(Box::new(WordnikProvider::from_config(&config.wordnik)))
        } else {
            tracing::warn!("No Wordnik API key, using the offline dictionary only");
            None
        };
        Self::new(online, offline)
    }

    pub fn is_online(&self) -> bool {
        self.online.is_some()
    }

    /// Define a word. Errors from the online provider are turned into a
    /// message on the offline result.
    pub async fn define(&self, word: &str) -> Lookup {
        let mut lookup = match &self.online {
            Some(provider) => match provider.define(word).await {
                Ok(lookup) => lookup,
                Err(e) => {
                    tracing::warn!("{} lookup for '{}' failed: {}", provider.metadata().name, word, e);
                    let mut lookup = self.offline.lookup(word);
                    lookup.messages.push(CONNECT_MESSAGE.to_string());
                    lookup
                }
            },
            None => {
                let mut lookup = self.offline.lookup(word);
                if !lookup.has_definitions() {
                    lookup.messages.extend(
                        [OFFLINE_MESSAGE, API_KEY_MESSAGE, SET_KEY_MESSAGE].map(String::from),
                    );
                }
                lookup
            }
        };

        lookup.word = word.to_string();
        lookup
    }
}
