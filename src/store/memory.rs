use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FavoritesStore, insert_unique, remove_exact};
use crate::Result;
use crate::models::FavoriteEntry;

/// Favorites kept in process memory; lost on restart
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    entries: RwLock<Vec<FavoriteEntry>>,
}

impl MemoryFavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn list(&self) -> Result<Vec<FavoriteEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn add(&self, city: &str, state: &str) -> Result<FavoriteEntry> {
        let mut entries = self.entries.write().await;
        insert_unique(&mut entries, city, state)
    }

    async fn remove(&self, city: &str, state: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        remove_exact(&mut entries, city, state)
    }
}
