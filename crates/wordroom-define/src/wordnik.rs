use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use wordroom_config::wordnik::WordnikConfig;

use crate::{DefineError, Definition, DefinitionProvider, Lookup, ProviderMetadata};

/// Online definitions from the Wordnik v4 API.
#[derive(Clone)]
pub struct WordnikProvider {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct WordnikDefinition {
    text: Option<String>,
    #[serde(rename = "partOfSpeech")]
    part_of_speech: Option<String>,
    #[serde(rename = "attributionText")]
    attribution_text: Option<String>,
    #[serde(rename = "attributionUrl")]
    attribution_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WordnikWord {
    #[serde(default)]
    suggestions: Vec<String>,
}

impl WordnikProvider {
    pub fn new(api_key: String, api_url: String, limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            limit,
        }
    }

    pub fn from_config(config: &WordnikConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.definition_limit,
        )
    }

    /// `{api_url}/word.json/{word}[/definitions]`, with the word percent-encoded.
    fn word_url(&self, word: &str, definitions: bool) -> Result<Url, DefineError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| DefineError::ApiError(format!("Invalid API URL: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DefineError::ApiError(format!("Invalid API URL: {}", self.api_url)))?;
            segments.pop_if_empty().push("word.json").push(word);
            if definitions {
                segments.push("definitions");
            }
        }
        Ok(url)
    }

    async fn get_json<T>(&self, url: Url, params: &[(&str, String)]) -> Result<Option<T>, DefineError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => return Err(DefineError::RateLimitExceeded),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DefineError::AuthenticationError);
            }
            status if !status.is_success() => {
                return Err(DefineError::ApiError(format!("HTTP {}", status)));
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| DefineError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

/// Turn the raw API payloads into a [`Lookup`].
fn build_lookup(word: &str, definitions: Vec<WordnikDefinition>, suggestions: Vec<String>) -> Lookup {
    let (attribution, attribution_url) = definitions
        .first()
        .map(|d| {
            (
                d.attribution_text.clone().unwrap_or_default(),
                d.attribution_url.clone().unwrap_or_default(),
            )
        })
        .unwrap_or_default();

    let definitions = definitions
        .into_iter()
        .filter_map(|d| {
            d.text.map(|text| Definition {
                text,
                part_of_speech: d.part_of_speech.unwrap_or_default(),
            })
        })
        .collect();

    Lookup {
        word: word.to_string(),
        definitions,
        attribution,
        attribution_url,
        suggestions,
        messages: vec![],
    }
}

#[async_trait]
impl DefinitionProvider for WordnikProvider {
    async fn define(&self, word: &str) -> Result<Lookup, DefineError> {
        if self.api_key.is_empty() {
            return Err(DefineError::AuthenticationError);
        }

        let definitions: Vec<WordnikDefinition> = self
            .get_json(
                self.word_url(word, true)?,
                &[("limit", self.limit.to_string())],
            )
            .await?
            .unwrap_or_default();
        tracing::debug!("Wordnik returned {} definitions for '{}'", definitions.len(), word);

        let suggestions = self
            .get_json::<WordnikWord>(
                self.word_url(word, false)?,
                &[("includeSuggestions", "true".to_string())],
            )
            .await?
            .unwrap_or_default()
            .suggestions;

        Ok(build_lookup(word, definitions, suggestions))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Wordnik".to_string(),
            requires_api_key: true,
            online: true,
        }
    }
}
