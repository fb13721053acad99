//! Favorites store
//!
//! A small collection of (city, state) pairs, unique by pair. The persistent
//! implementation lives on a fjall keyspace; the in-memory one backs tests and
//! throwaway runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::models::FavoriteEntry;
use crate::{Result, WeatherSearchError};

pub mod memory;
pub mod persistent;

pub use memory::MemoryFavoritesStore;
pub use persistent::FjallFavoritesStore;

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// All entries in insertion order
    async fn list(&self) -> Result<Vec<FavoriteEntry>>;

    /// Insert a previously unseen pair, failing with `DuplicateEntry` otherwise
    async fn add(&self, city: &str, state: &str) -> Result<FavoriteEntry>;

    /// Delete the entry matching both fields exactly, failing with `NotFound` otherwise
    async fn remove(&self, city: &str, state: &str) -> Result<()>;
}

/// Open the store described by the configuration
pub fn open(config: &StoreConfig) -> Result<Arc<dyn FavoritesStore>> {
    if config.in_memory {
        tracing::info!("Using in-memory favorites store");
        return Ok(Arc::new(MemoryFavoritesStore::new()));
    }

    let path = config.resolved_path();
    tracing::info!(path = %path.display(), "Opening favorites store");
    let store = FjallFavoritesStore::open(&path).map_err(|e| {
        WeatherSearchError::persistence(format!(
            "failed to open favorites store at {}: {e:#}",
            path.display()
        ))
    })?;
    Ok(Arc::new(store))
}

/// Shared check-then-insert used by both implementations
pub(crate) fn insert_unique(
    entries: &mut Vec<FavoriteEntry>,
    city: &str,
    state: &str,
) -> Result<FavoriteEntry> {
    if entries.iter().any(|e| e.matches(city, state)) {
        return Err(WeatherSearchError::duplicate(city, state));
    }
    let entry = FavoriteEntry::new(city, state);
    entries.push(entry.clone());
    Ok(entry)
}

/// Shared exact-match removal used by both implementations
pub(crate) fn remove_exact(entries: &mut Vec<FavoriteEntry>, city: &str, state: &str) -> Result<()> {
    let before = entries.len();
    entries.retain(|e| !e.matches(city, state));
    if entries.len() == before {
        return Err(WeatherSearchError::not_found(city, state));
    }
    Ok(())
}
