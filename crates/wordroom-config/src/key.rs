use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// On-disk API key store. Unknown fields are kept so other tools can share the file.
#[derive(Default, Serialize, Deserialize)]
pub struct KeyFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordnik_api_key: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl KeyFile {
    /// A missing or malformed file reads as an empty one.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("No key file at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed key file {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Replace the Wordnik key, keeping anything else in the file.
    pub fn store(path: &Path, api_key: &str) -> io::Result<()> {
        let mut file = Self::load(path);
        file.wordnik_api_key = Some(api_key.trim().to_string());
        let data = serde_json::to_string(&file)?;
        fs::write(path, data)?;
        tracing::info!("Saved Wordnik API key to {}", path.display());
        Ok(())
    }
}
