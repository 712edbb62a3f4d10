use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("opted")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OfflineConfig {
    /// Directory holding the per-letter OPTED files (`a.json` .. `z.json`)
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl OfflineConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let dir = var("OPTED_DIR").map(PathBuf::from).unwrap_or_else(default_dir);
        Self { dir }
    }
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
