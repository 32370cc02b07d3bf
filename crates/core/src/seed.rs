//! Demo data loading

use crate::{gateway::SearchGateway, types::Item, GatewayError};
use thiserror::Error;
use tracing::info;

/// Fixed demo item set as `(name, category)`
pub const DEMO_ITEMS: [(&str, &str); 5] = [
    ("iPhone 14", "phone"),
    ("iPhone 15 Pro", "phone"),
    ("Samsung Galaxy S23", "phone"),
    ("MacBook Air M2", "laptop"),
    ("MacBook Pro M3", "laptop"),
];

/// Demo items in indexing order
pub fn demo_items() -> Vec<Item> {
    DEMO_ITEMS
        .iter()
        .map(|(name, category)| Item::new(*name, *category))
        .collect()
}

/// Failure of a seed run
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Seed endpoint disabled in production")]
    Disabled,

    #[error("Seeding failed: {0}")]
    Failed(#[source] GatewayError),
}

impl SearchGateway {
    /// Index the demo item set, one document per request
    ///
    /// Refused in production. Stops at the first failed request, so a
    /// partial seed is possible. Re-running adds the documents again unless
    /// the engine treats them as overwrites.
    pub async fn seed(&self) -> std::result::Result<usize, SeedError> {
        if self.mode.is_production() {
            return Err(SeedError::Disabled);
        }

        let items = demo_items();
        for item in &items {
            self.search
                .index(self.index(), item)
                .await
                .map_err(SeedError::Failed)?;
        }

        info!("Seeded {} items into {}", items.len(), self.index());
        Ok(items.len())
    }
}
