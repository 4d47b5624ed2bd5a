//! Card catalog sources
//!
//! A source hands out the raw, loosely-typed card records the normalizer turns
//! into canonical cards. Sources are swappable: a JSON file on disk in
//! production, a fixed record list in tests or embedded setups.

use serde_json::Value;

use crate::{error::AppResult, models::Card, services::normalizer};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileCardSource;
pub use memory::InMemoryCardSource;

/// Trait for raw card record providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CardSource: Send + Sync {
    /// Fetch every raw card record, in catalog order
    async fn load_raw(&self) -> AppResult<Vec<Value>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Loads the catalog from `source` and normalizes it
pub async fn load_catalog(source: &dyn CardSource) -> AppResult<Vec<Card>> {
    let raw = source.load_raw().await?;
    let cards = normalizer::normalize(&raw);

    tracing::debug!(
        source = source.name(),
        card_count = cards.len(),
        "Card catalog loaded"
    );

    Ok(cards)
}
