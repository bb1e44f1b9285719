use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::{ApiEnvelope, SearchResponse, SearchType};

/// How long a cached search result stays valid.
pub const CACHE_TTL: Duration = Duration::from_millis(300_000);

/// Upper bound on retained entries; the oldest entry is dropped when full.
pub const CACHE_CAPACITY: usize = 128;

/// Cache key derived from the significant request fields. Two requests
/// with the same query, limit, and search type always collide here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_search(query: &str, limit: usize, search_type: SearchType) -> Self {
        Self(format!("search:{query}:{limit}:{search_type}"))
    }
}

struct CacheEntry {
    value: ApiEnvelope<SearchResponse>,
    stored_at: Instant,
}

/// In-memory result cache scoped to one [`ApiClient`](crate::api::ApiClient)
/// instance. Entries past the TTL are invisible to readers and removed
/// lazily; writers evict the oldest entry once the capacity bound is hit.
///
/// Concurrent identical requests may both miss and both populate the same
/// key; the second write simply replaces the first.
pub struct SearchCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
}

impl SearchCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<ApiEnvelope<SearchResponse>> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: CacheKey, value: ApiEnvelope<SearchResponse>) {
        self.put_at(key, value, Instant::now());
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<ApiEnvelope<SearchResponse>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put_at(&self, key: CacheKey, value: ApiEnvelope<SearchResponse>, now: Instant) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(CACHE_TTL, CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchResponse;

    fn envelope(query: &str) -> ApiEnvelope<SearchResponse> {
        ApiEnvelope::success(SearchResponse {
            query: query.to_string(),
            results: vec![],
            total: 0,
            platform: String::new(),
            search_type: String::new(),
            data_source: String::new(),
            ai_features: None,
        })
    }

    #[test]
    fn key_is_deterministic_for_identical_fields() {
        let a = CacheKey::for_search("2bhk pune", 50, SearchType::Hybrid);
        let b = CacheKey::for_search("2bhk pune", 50, SearchType::Hybrid);
        assert_eq!(a, b);
        assert_ne!(a, CacheKey::for_search("2bhk pune", 50, SearchType::Keyword));
        assert_ne!(a, CacheKey::for_search("2bhk pune", 10, SearchType::Hybrid));
    }

    #[test]
    fn hit_within_ttl() {
        let cache = SearchCache::default();
        let key = CacheKey::for_search("flat", 10, SearchType::Hybrid);
        let t0 = Instant::now();
        cache.put_at(key.clone(), envelope("flat"), t0);
        let hit = cache.get_at(&key, t0 + Duration::from_secs(299));
        assert_eq!(hit.unwrap().data.query, "flat");
    }

    #[test]
    fn expired_entry_is_invisible() {
        let cache = SearchCache::default();
        let key = CacheKey::for_search("flat", 10, SearchType::Hybrid);
        let t0 = Instant::now();
        cache.put_at(key.clone(), envelope("flat"), t0);
        assert!(cache.get_at(&key, t0 + Duration::from_secs(301)).is_none());
        // The expired entry was dropped for good, not just hidden.
        assert!(cache.get_at(&key, t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn capacity_bound_evicts_oldest() {
        let cache = SearchCache::new(CACHE_TTL, 2);
        let t0 = Instant::now();
        let k1 = CacheKey::for_search("a", 10, SearchType::Hybrid);
        let k2 = CacheKey::for_search("b", 10, SearchType::Hybrid);
        let k3 = CacheKey::for_search("c", 10, SearchType::Hybrid);
        cache.put_at(k1.clone(), envelope("a"), t0);
        cache.put_at(k2.clone(), envelope("b"), t0 + Duration::from_secs(1));
        cache.put_at(k3.clone(), envelope("c"), t0 + Duration::from_secs(2));
        let later = t0 + Duration::from_secs(3);
        assert!(cache.get_at(&k1, later).is_none());
        assert!(cache.get_at(&k2, later).is_some());
        assert!(cache.get_at(&k3, later).is_some());
    }

    #[test]
    fn rewrite_of_existing_key_does_not_evict() {
        let cache = SearchCache::new(CACHE_TTL, 2);
        let t0 = Instant::now();
        let k1 = CacheKey::for_search("a", 10, SearchType::Hybrid);
        let k2 = CacheKey::for_search("b", 10, SearchType::Hybrid);
        cache.put_at(k1.clone(), envelope("a"), t0);
        cache.put_at(k2.clone(), envelope("b"), t0);
        cache.put_at(k1.clone(), envelope("a2"), t0 + Duration::from_secs(1));
        let later = t0 + Duration::from_secs(2);
        assert_eq!(cache.get_at(&k1, later).unwrap().data.query, "a2");
        assert!(cache.get_at(&k2, later).is_some());
    }
}
