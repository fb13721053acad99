//! Persistent favorites store on a temporary directory

use weather_search::WeatherSearchError;
use weather_search::config::StoreConfig;
use weather_search::store::{self, FavoritesStore, FjallFavoritesStore};

#[tokio::test]
async fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FjallFavoritesStore::open(dir.path()).unwrap();
        store.add("Los Angeles", "California").await.unwrap();
        store.add("Boston", "Massachusetts").await.unwrap();
        store.add("Austin", "Texas").await.unwrap();
        store.remove("Boston", "Massachusetts").await.unwrap();
    }

    let store = FjallFavoritesStore::open(dir.path()).unwrap();
    let entries = store.list().await.unwrap();
    let pairs: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.city.as_str(), e.state.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Los Angeles", "California"), ("Austin", "Texas")]);

    let err = store.add("Austin", "Texas").await.unwrap_err();
    assert!(matches!(err, WeatherSearchError::DuplicateEntry { .. }));
}

#[tokio::test]
async fn test_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = FjallFavoritesStore::open(dir.path()).unwrap();

    assert!(store.list().await.unwrap().is_empty());
    let err = store.remove("Seattle", "Washington").await.unwrap_err();
    assert!(matches!(err, WeatherSearchError::NotFound { .. }));
}

#[tokio::test]
async fn test_concurrent_adds_of_same_pair() {
    let dir = tempfile::tempdir().unwrap();
    let store = std::sync::Arc::new(FjallFavoritesStore::open(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.add("Denver", "Colorado").await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        path: dir.path().join("favorites").to_string_lossy().into_owned(),
        in_memory: false,
    };
    let store = store::open(&config).unwrap();
    store.add("Miami", "Florida").await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);

    let memory = store::open(&StoreConfig {
        in_memory: true,
        ..StoreConfig::default()
    })
    .unwrap();
    assert!(memory.list().await.unwrap().is_empty());
}
