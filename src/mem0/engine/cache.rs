//! Memoization of assembled configurations.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::mem0::core::{ConfigResult, MemoryConfig};
use crate::mem0::fields::Credentials;

/// Content hash of a credential map.
///
/// Keys are serialized in sorted order, so equal maps hash equally regardless
/// of insertion order. Returns `None` (caching skipped) if serialization fails.
#[must_use]
pub fn cache_key(credentials: &Credentials) -> Option<String> {
    serde_json::to_vec(credentials)
        .map(|bytes| format!("{:x}", md5::compute(bytes)))
        .inspect_err(|err| warn!("Credentials are not serializable, skipping config cache: {err}"))
        .ok()
}

/// Thread-safe cache of assembled configurations.
///
/// Entries live as long as the cache and are never evicted. Lookups of a
/// populated key take no lock; builds are serialized by a single mutex and
/// re-check the map after acquiring it, so each key is built at most once.
#[derive(Debug, Default)]
pub struct BuildCache {
    entries: DashMap<String, Arc<MemoryConfig>>,
    build_lock: Mutex<()>,
}

impl BuildCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached configuration for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<MemoryConfig>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached configuration for `key`, or run `build` and store it.
    ///
    /// With `key` set to `None` the build still runs under the lock but its
    /// result is not stored.
    ///
    /// # Errors
    /// Propagates the error from `build`; nothing is cached in that case.
    #[allow(clippy::significant_drop_tightening)]
    pub fn get_or_try_build<F>(
        &self,
        key: Option<&str>,
        build: F,
    ) -> ConfigResult<Arc<MemoryConfig>>
    where
        F: FnOnce() -> ConfigResult<MemoryConfig>,
    {
        if let Some(hit) = key.and_then(|k| self.get(k)) {
            return Ok(hit);
        }

        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(hit) = key.and_then(|k| self.get(k)) {
            debug!("Config built concurrently, using cached entry");
            return Ok(hit);
        }

        let config = Arc::new(build()?);
        if let Some(key) = key {
            self.entries.insert(key.to_string(), Arc::clone(&config));
        }
        Ok(config)
    }

    /// Number of cached configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
