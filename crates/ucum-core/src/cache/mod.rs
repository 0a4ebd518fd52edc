//! Memoization of validation and canonicalization results
//!
//! Two bounded LRU maps sit behind mutexes: validated terms keyed by input
//! text, and canonical steps keyed by the printed term. Both keys include the
//! feature flags, since the flags change results. Values are computed outside
//! the lock, so two threads racing on the same key may both compute it; the
//! results are identical and the later insert wins.
//!
//! ```rust,ignore
//! let cache = Cache::new(CacheConfig::default().with_capacity(256));
//! ```

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::canon::CanonicalStep;
use crate::config::FeatureFlags;
use crate::error::ParseError;
use crate::types::Term;

/// Cache sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Entries per map; 0 disables caching
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
        }
    }
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Text plus the flags it was processed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    flags: FeatureFlags,
}

impl CacheKey {
    pub fn new(text: impl Into<String>, flags: FeatureFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }
}

/// Hit and miss counters across both maps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

type Map<V> = Option<Mutex<LruCache<CacheKey, V>>>;

/// Engine-wide result cache
pub struct Cache {
    validated: Map<Result<Term, ParseError>>,
    canonical: Map<CanonicalStep>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Cache {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).filter(|_| config.enabled);
        Self {
            validated: capacity.map(|cap| Mutex::new(LruCache::new(cap))),
            canonical: capacity.map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn disabled() -> Self {
        Self::new(CacheConfig::disabled())
    }

    pub fn is_enabled(&self) -> bool {
        self.validated.is_some()
    }

    /// Cached validation result, or compute and store it
    pub fn validated_or_insert_with(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<Term, ParseError>,
    ) -> Result<Term, ParseError> {
        if let Some(hit) = self.lookup(&self.validated, &key) {
            return hit;
        }
        let value = compute();
        self.store(&self.validated, key, value.clone());
        value
    }

    pub fn canonical(&self, key: &CacheKey) -> Option<CanonicalStep> {
        self.lookup(&self.canonical, key)
    }

    pub fn store_canonical(&self, key: CacheKey, step: CanonicalStep) {
        self.store(&self.canonical, key, step);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop all entries; counters are kept
    pub fn clear(&self) {
        if let Some(Ok(mut map)) = self.validated.as_ref().map(Mutex::lock) {
            map.clear();
        }
        if let Some(Ok(mut map)) = self.canonical.as_ref().map(Mutex::lock) {
            map.clear();
        }
    }

    fn lookup<V: Clone>(&self, map: &Map<V>, key: &CacheKey) -> Option<V> {
        let map = map.as_ref()?;
        // poisoned lock: behave as a miss without counting
        let hit = map.lock().ok()?.get(key).cloned();
        let counter = if hit.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        if hit.is_some() {
            tracing::debug!(key = %key.text, "cache hit");
        }
        hit
    }

    fn store<V>(&self, map: &Map<V>, key: CacheKey, value: V) {
        if let Some(Ok(mut map)) = map.as_ref().map(Mutex::lock) {
            map.put(key, value);
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
