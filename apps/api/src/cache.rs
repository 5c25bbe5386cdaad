//! In-process TTL cache for profiles and recommendation pages.
//!
//! Best-effort only: unbounded, non-durable, gone on restart. Keys are
//! composite strings so a user's entries can be dropped with one prefix scan
//! on journal mutation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached value if present and not expired.
    /// An expired hit is removed so the map does not accumulate dead entries.
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(e) if e.inserted_at.elapsed() < self.ttl => return Some(e.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(e) = entries.get(key) {
            if e.inserted_at.elapsed() < self.ttl {
                return Some(e.value.clone());
            }
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes every entry whose key starts with `prefix`. Returns the number
    /// of entries dropped.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let keys: Vec<String> = entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        for key in &keys {
            entries.remove(key);
        }
        keys.len()
    }

    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_inserted_value() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.insert("profile-u1", "rust".to_string()).await;
        assert_eq!(cache.get("profile-u1").await, Some("rust".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("profile-u1").await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(10));
        cache.insert("k", 1).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get("k").await, None);
        // the stale entry was evicted, not just hidden
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_insert_overwrites_and_refreshes() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1).await;
        cache.insert("k", 2).await;
        assert_eq!(cache.get("k").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_prefix_only_hits_matching_keys() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("u1-p1-n6", 1).await;
        cache.insert("u1-p2-n6", 2).await;
        cache.insert("u2-p1-n6", 3).await;

        let dropped = cache.invalidate_prefix("u1-").await;
        assert_eq!(dropped, 2);
        assert_eq!(cache.get("u1-p1-n6").await, None);
        assert_eq!(cache.get("u1-p2-n6").await, None);
        assert_eq!(cache.get("u2-p1-n6").await, Some(3));
    }

    #[tokio::test]
    async fn test_invalidate_prefix_no_matches() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("u2-p1-n6", 3).await;
        assert_eq!(cache.invalidate_prefix("u1-").await, 0);
        assert_eq!(cache.len().await, 1);
    }
}
