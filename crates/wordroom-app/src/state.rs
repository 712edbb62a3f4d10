use std::sync::Arc;

use wordroom_config::Config;
use wordroom_core::{JsonFileStorage, Vocabulary};
use wordroom_define::Definer;

pub struct AppState {
    pub config: Config,
    pub vocab: Vocabulary,
    pub definer: Arc<Definer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let vocab = Vocabulary::open(JsonFileStorage::new(&config.storage.data_file));
        let definer = Arc::new(Definer::from_config(&config));

        Self {
            config,
            vocab,
            definer,
        }
    }

    /// Rebuild the definer after the API key changed.
    pub fn set_api_key(&mut self, api_key: &str) {
        self.config.wordnik.api_key = api_key.trim().to_string();
        self.definer = Arc::new(Definer::from_config(&self.config));
        tracing::info!("Definer rebuilt (online: {})", self.definer.is_online());
    }
}
