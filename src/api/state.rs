use std::sync::Arc;

use crate::services::{CardSource, EngineSettings};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where the raw card catalog comes from
    pub card_source: Arc<dyn CardSource>,
    pub settings: Arc<EngineSettings>,
}

impl AppState {
    pub fn new(card_source: Arc<dyn CardSource>, settings: EngineSettings) -> Self {
        Self {
            card_source,
            settings: Arc::new(settings),
        }
    }
}
