use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use fjall::{Database, Keyspace, PersistMode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task;

use super::{FavoritesStore, insert_unique, remove_exact};
use crate::models::FavoriteEntry;
use crate::{Result, WeatherSearchError};

const FAVORITES_KEY: &[u8] = b"favorites";

/// On-disk record: the whole collection, postcard-encoded under one key
#[derive(Serialize, Deserialize, Default)]
struct StoredFavorites {
    entries: Vec<FavoriteEntry>,
}

/// Favorites persisted in a fjall keyspace.
///
/// Writes are serialized through `write_lock`, so the existence check and the
/// insert of one `add` never interleave with another write in this process.
pub struct FjallFavoritesStore {
    db: Database,
    store: Keyspace,
    write_lock: Mutex<()>,
}

fn read_from_store(store: Keyspace) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(FAVORITES_KEY)?.map(|v| v.to_vec()))
}

fn write_to_store(db: Database, store: Keyspace, bytes: Vec<u8>) -> anyhow::Result<()> {
    store.insert(FAVORITES_KEY, bytes)?;
    db.persist(PersistMode::SyncAll)?;
    Ok(())
}

impl FjallFavoritesStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = Database::builder(&path).open()?;
        let store = db.keyspace("favorites", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self {
            db,
            store,
            write_lock: Mutex::new(()),
        })
    }

    #[tracing::instrument(name = "load_favorites", level = "debug", skip(self))]
    async fn load(&self) -> anyhow::Result<Vec<FavoriteEntry>> {
        let store = self.store.clone();
        let maybe_bytes = task::spawn_blocking(move || read_from_store(store)).await??;

        match maybe_bytes {
            Some(bytes) => {
                let stored: StoredFavorites =
                    postcard::from_bytes(&bytes).context("favorites record is corrupt")?;
                tracing::debug!(count = stored.entries.len(), "Loaded favorites");
                Ok(stored.entries)
            }
            None => {
                tracing::debug!("No favorites record yet");
                Ok(Vec::new())
            }
        }
    }

    #[tracing::instrument(name = "save_favorites", level = "debug", skip_all, fields(count = entries.len()))]
    async fn save(&self, entries: Vec<FavoriteEntry>) -> anyhow::Result<()> {
        let bytes = postcard::to_stdvec(&StoredFavorites { entries })?;
        let db = self.db.clone();
        let store = self.store.clone();
        task::spawn_blocking(move || write_to_store(db, store, bytes)).await??;
        Ok(())
    }
}

fn persistence(err: anyhow::Error) -> WeatherSearchError {
    WeatherSearchError::persistence(format!("{err:#}"))
}

#[async_trait]
impl FavoritesStore for FjallFavoritesStore {
    async fn list(&self) -> Result<Vec<FavoriteEntry>> {
        self.load().await.map_err(persistence)
    }

    #[tracing::instrument(skip(self))]
    async fn add(&self, city: &str, state: &str) -> Result<FavoriteEntry> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await.map_err(persistence)?;
        let entry = insert_unique(&mut entries, city, state)?;
        self.save(entries).await.map_err(persistence)?;

        tracing::info!(id = %entry.id, "Added favorite");
        Ok(entry)
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, city: &str, state: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await.map_err(persistence)?;
        remove_exact(&mut entries, city, state)?;
        self.save(entries).await.map_err(persistence)?;

        tracing::info!("Removed favorite");
        Ok(())
    }
}
