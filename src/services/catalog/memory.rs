use serde_json::Value;

use crate::{error::AppResult, services::catalog::CardSource};

/// Serves a fixed list of raw card records
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardSource {
    records: Vec<Value>,
}

impl InMemoryCardSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl CardSource for InMemoryCardSource {
    async fn load_raw(&self) -> AppResult<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
