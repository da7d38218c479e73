use std::sync::Arc;

use crate::config::Config;
use crate::services::explainer::Explainer;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    config: Arc<Config>,
    explainer: Arc<Explainer>,
}

impl AppState {
    pub fn new(store: Arc<Store>, config: &Config) -> Self {
        let explainer = Arc::new(Explainer::new(&config.llm));
        Self {
            store,
            config: Arc::new(config.clone()),
            explainer,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn explainer(&self) -> &Explainer {
        &self.explainer
    }
}
