use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::key::KeyFile;
use self::offline::OfflineConfig;
use self::storage::StorageConfig;
use self::wordnik::WordnikConfig;

pub mod key;
pub mod offline;
pub mod storage;
pub mod wordnik;

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub wordnik: WordnikConfig,
    pub offline: OfflineConfig,

    /// Where the Wordnik API key is kept between runs
    pub config_file: PathBuf,
    /// Upper bound for a single definition lookup
    pub timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let config_file = var("WORDROOM_CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.json"));

        let timeout_seconds = var("TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        Config {
            storage: StorageConfig::from_lookup(&var),
            wordnik: WordnikConfig::from_lookup(&var),
            offline: OfflineConfig::from_lookup(&var),

            config_file,
            timeout_seconds,
        }
    }

    /// Fill in the API key from the key file unless the environment already set one.
    pub fn with_key_file(mut self) -> Self {
        if self.wordnik.api_key.is_empty() {
            let key = KeyFile::load(&self.config_file);
            if let Some(api_key) = key.wordnik_api_key {
                tracing::debug!("Using Wordnik API key from {}", self.config_file.display());
                self.wordnik.api_key = api_key;
            }
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
