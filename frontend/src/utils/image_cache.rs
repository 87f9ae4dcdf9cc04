//! Bounded image cache persisted to browser storage.
//!
//! Entries are data URLs keyed by the original image URL. Reads never change
//! eviction order, so the cache behaves first-in first-out: when full, the
//! entry inserted first is dropped. Every insert rewrites the stored JSON
//! (`[[url, data_url], ...]`, oldest first).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use lru::LruCache;
use std::{cell::RefCell, num::NonZeroUsize};
use thiserror::Error;

pub const IMAGE_CACHE_KEY: &str = "image_cache";
pub const IMAGE_CACHE_CAPACITY: usize = 100;
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum ImageCacheError {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("stored cache is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to serialise cache: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },
}

/// Where the serialised cache lives.
pub trait CacheStore {
    fn load(&self) -> Result<Option<String>, ImageCacheError>;
    fn save(&self, json: &str) -> Result<(), ImageCacheError>;
    fn remove(&self) -> Result<(), ImageCacheError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_value(json: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(json.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, ImageCacheError> {
        Ok(self.snapshot())
    }

    fn save(&self, json: &str) -> Result<(), ImageCacheError> {
        *self.value.borrow_mut() = Some(json.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), ImageCacheError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl CacheStore for LocalStore {
    fn load(&self) -> Result<Option<String>, ImageCacheError> {
        crate::utils::storage::read_item(IMAGE_CACHE_KEY).map_err(ImageCacheError::Storage)
    }

    fn save(&self, json: &str) -> Result<(), ImageCacheError> {
        crate::utils::storage::write_item(IMAGE_CACHE_KEY, json).map_err(ImageCacheError::Storage)
    }

    fn remove(&self) -> Result<(), ImageCacheError> {
        crate::utils::storage::remove_item(IMAGE_CACHE_KEY).map_err(ImageCacheError::Storage)
    }
}

pub struct ImageCache<S: CacheStore> {
    entries: LruCache<String, String>,
    store: S,
}

impl<S: CacheStore> ImageCache<S> {
    pub fn load(store: S) -> Self {
        Self::load_with_capacity(store, IMAGE_CACHE_CAPACITY)
    }

    pub fn load_with_capacity(store: S, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        let mut cache = Self {
            entries: LruCache::new(cap),
            store,
        };
        match cache.read_stored() {
            Ok(pairs) => {
                for (url, data_url) in pairs {
                    cache.entries.push(url, data_url);
                }
            }
            Err(err) => log::warn!("Failed to load image cache: {}", err),
        }
        cache
    }

    fn read_stored(&self) -> Result<Vec<(String, String)>, ImageCacheError> {
        match self.store.load()? {
            Some(json) => serde_json::from_str(&json).map_err(ImageCacheError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    pub fn get(&self, url: &str) -> Option<&String> {
        self.entries.peek(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Urls from oldest to newest insert.
    pub fn urls(&self) -> Vec<String> {
        self.entries.iter().rev().map(|(url, _)| url.clone()).collect()
    }

    /// Existing keys keep their position; new keys may evict the oldest.
    pub fn insert(&mut self, url: impl Into<String>, data_url: impl Into<String>) {
        let url = url.into();
        let data_url = data_url.into();
        if let Some(existing) = self.entries.peek_mut(&url) {
            *existing = data_url;
        } else if let Some((evicted, _)) = self.entries.push(url, data_url) {
            log::debug!("Image cache full, evicted {}", evicted);
        }
        if let Err(err) = self.persist() {
            log::warn!("Failed to save image cache: {}", err);
        }
    }

    fn persist(&self) -> Result<(), ImageCacheError> {
        let pairs: Vec<(&String, &String)> = self.entries.iter().rev().collect();
        let json = serde_json::to_string(&pairs).map_err(ImageCacheError::Serialize)?;
        self.store.save(&json)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.store.remove() {
            log::warn!("Failed to remove image cache from storage: {}", err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = mime.split(';').next().map(str::trim).unwrap_or_default();
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

async fn download_data_url(url: &str) -> Result<String, ImageCacheError> {
    let fetch_error = |reason: String| ImageCacheError::Fetch {
        url: url.to_string(),
        reason,
    };
    let response = reqwest::get(url)
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_error(format!("status {}", response.status())));
    }
    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(FALLBACK_MIME)
        .to_string();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    Ok(to_data_url(&mime, &bytes))
}

#[cfg(target_arch = "wasm32")]
type SharedStore = LocalStore;
#[cfg(not(target_arch = "wasm32"))]
type SharedStore = MemoryStore;

thread_local! {
    static SHARED: RefCell<Option<ImageCache<SharedStore>>> = const { RefCell::new(None) };
}

fn with_shared<R>(f: impl FnOnce(&mut ImageCache<SharedStore>) -> R) -> R {
    SHARED.with(|cell| {
        let mut slot = cell.borrow_mut();
        let cache = slot.get_or_insert_with(|| ImageCache::load(SharedStore::default()));
        f(cache)
    })
}

/// Data URL for `url`, downloading and caching it on a miss. Falls back to
/// `url` itself when the download fails.
pub async fn cached_image_url(url: &str) -> String {
    if url.trim().is_empty() || url.starts_with("data:") {
        return url.to_string();
    }
    if let Some(hit) = with_shared(|cache| cache.get(url).cloned()) {
        return hit;
    }
    match download_data_url(url).await {
        Ok(data_url) => {
            with_shared(|cache| cache.insert(url, data_url.clone()));
            data_url
        }
        Err(err) => {
            log::warn!("Failed to cache image: {}", err);
            url.to_string()
        }
    }
}

pub fn clear_shared_cache() {
    with_shared(|cache| cache.clear());
    log::info!("Image cache cleared");
}

pub fn shared_cache_len() -> usize {
    with_shared(|cache| cache.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl CacheStore for FailingStore {
        fn load(&self) -> Result<Option<String>, ImageCacheError> {
            Err(ImageCacheError::Storage("denied".into()))
        }
        fn save(&self, _json: &str) -> Result<(), ImageCacheError> {
            Err(ImageCacheError::Storage("quota exceeded".into()))
        }
        fn remove(&self) -> Result<(), ImageCacheError> {
            Err(ImageCacheError::Storage("denied".into()))
        }
    }

    #[test]
    fn loads_pairs_oldest_first() {
        let cache = ImageCache::load(MemoryStore::with_value(
            r#"[["https://a","data:a"],["https://b","data:b"]]"#,
        ));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("https://b").map(String::as_str), Some("data:b"));
        assert_eq!(cache.urls(), vec!["https://a", "https://b"]);
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let cache = ImageCache::load(MemoryStore::with_value("{not json"));
        assert!(cache.is_empty());
        let cache = ImageCache::load(FailingStore);
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_evicts_first_inserted_even_after_reads() {
        let mut cache = ImageCache::load_with_capacity(MemoryStore::default(), 3);
        cache.insert("u1", "d1");
        cache.insert("u2", "d2");
        cache.insert("u3", "d3");
        assert!(cache.get("u1").is_some());
        cache.insert("u4", "d4");
        assert!(!cache.contains("u1"));
        assert_eq!(cache.urls(), vec!["u2", "u3", "u4"]);
    }

    #[test]
    fn reinserting_replaces_value_in_place() {
        let mut cache = ImageCache::load_with_capacity(MemoryStore::default(), 2);
        cache.insert("u1", "old");
        cache.insert("u2", "d2");
        cache.insert("u1", "new");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("u1").map(String::as_str), Some("new"));
        cache.insert("u3", "d3");
        assert!(!cache.contains("u1"));
        assert_eq!(cache.urls(), vec!["u2", "u3"]);
    }

    #[test]
    fn every_insert_is_persisted() {
        let mut cache = ImageCache::load(MemoryStore::default());
        cache.insert("https://img/1.jpg", "data:image/jpeg;base64,AAA=");
        cache.insert("https://img/2.jpg", "data:image/png;base64,BBB=");
        let stored = cache.store().snapshot().unwrap();
        let pairs: Vec<(String, String)> = serde_json::from_str(&stored).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "https://img/1.jpg");
        assert_eq!(pairs[1].1, "data:image/png;base64,BBB=");
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let mut cache = ImageCache::load(MemoryStore::default());
        for i in 0..=IMAGE_CACHE_CAPACITY {
            cache.insert(format!("u{}", i), "d");
        }
        assert_eq!(cache.len(), IMAGE_CACHE_CAPACITY);
        assert!(!cache.contains("u0"));
        assert!(cache.contains("u100"));
    }

    #[test]
    fn save_failures_do_not_lose_memory_entries() {
        let mut cache = ImageCache::load(FailingStore);
        cache.insert("u1", "d1");
        assert_eq!(cache.get("u1").map(String::as_str), Some("d1"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_removes_stored_key() {
        let mut cache = ImageCache::load(MemoryStore::default());
        cache.insert("u1", "d1");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.store().snapshot(), None);
    }

    #[test]
    fn data_url_uses_base64_and_strips_parameters() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(
            to_data_url("image/svg+xml; charset=utf-8", b""),
            "data:image/svg+xml;base64,"
        );
        assert_eq!(
            to_data_url("", b"x"),
            "data:application/octet-stream;base64,eA=="
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod host_tests {
        use super::super::*;
        use httpmock::prelude::*;

        #[tokio::test]
        async fn miss_downloads_then_hit_is_served_from_cache() {
            clear_shared_cache();
            let server = MockServer::start_async().await;
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET).path("/img/1.png");
                    then.status(200)
                        .header("content-type", "image/png")
                        .body(b"png");
                })
                .await;
            let url = server.url("/img/1.png");

            let first = cached_image_url(&url).await;
            let second = cached_image_url(&url).await;

            assert_eq!(first, "data:image/png;base64,cG5n");
            assert_eq!(second, first);
            mock.assert_hits_async(1).await;
            assert_eq!(shared_cache_len(), 1);
        }

        #[tokio::test]
        async fn failed_download_returns_original_url() {
            clear_shared_cache();
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/img/missing.png");
                    then.status(404);
                })
                .await;
            let url = server.url("/img/missing.png");

            assert_eq!(cached_image_url(&url).await, url);
            assert_eq!(shared_cache_len(), 0);
        }

        #[tokio::test]
        async fn empty_and_data_urls_pass_through() {
            assert_eq!(cached_image_url("").await, "");
            assert_eq!(
                cached_image_url("data:image/png;base64,AA==").await,
                "data:image/png;base64,AA=="
            );
        }
    }
}
