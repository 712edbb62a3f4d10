use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.wordnik.com/v4".to_string()
}

fn default_definition_limit() -> u32 {
    5
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WordnikConfig {
    /// Empty means the online dictionary is disabled
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_definition_limit")]
    pub definition_limit: u32,
}

impl WordnikConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = var("WORDNIK_API_KEY").unwrap_or_default();
        let api_url = var("WORDNIK_API_URL").unwrap_or_else(default_api_url);
        let definition_limit = var("WORDNIK_DEFINITION_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_definition_limit);

        Self {
            api_key,
            api_url,
            definition_limit,
        }
    }

    pub fn enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for WordnikConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            definition_limit: default_definition_limit(),
        }
    }
}
