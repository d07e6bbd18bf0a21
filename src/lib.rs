pub mod analysis;
pub mod api;
pub mod characters;
pub mod config;
pub mod error;
pub mod page;
pub mod render;
pub mod store;

use std::sync::Arc;
use analysis::Analyzer;
use config::Config;
use page::SharedPage;
use store::NovelStore;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn NovelStore>) -> Self {
        let analyzer = Analyzer::new(store, SharedPage::new(), config.analysis_delay);
        Self {
            config: Arc::new(config),
            analyzer,
        }
    }
}
