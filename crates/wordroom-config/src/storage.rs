use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_file() -> PathBuf {
    PathBuf::from("vocabulary.json")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Vocabulary file, `[notes, history]`
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl StorageConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = var("WORDROOM_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);

        Self { data_file }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}
