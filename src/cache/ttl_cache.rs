//! Time-based response cache with per-entry TTL.
//!
//! Read responses are memoized under string keys for a short lifetime and
//! evicted explicitly when a write could have changed them. Expiry is lazy:
//! there is no background sweeper, an expired entry is removed by the first
//! `get` that observes it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A cached response with its expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// String-keyed cache with per-entry expiry and prefix-based mass eviction.
///
/// Payloads are stored as `serde_json::Value` and are opaque to the cache.
/// Cloning is cheap; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct TtlCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` for `ttl`, unconditionally overwriting any
    /// existing entry.
    pub fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), entry);
        }
    }

    /// Serialize `value` and store it. Values that fail to serialize are
    /// silently not cached; the next read will go to the network instead.
    pub fn set_as<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        if let Ok(json) = serde_json::to_value(value) {
            self.set(key, json, ttl);
        }
    }

    /// Return the value under `key` if present and not expired.
    ///
    /// An expired entry is physically removed as a side effect of this call.
    pub fn get(&self, key: &str) -> Option<Value> {
        let expired = {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if Instant::now() <= entry.expires_at => {
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            if let Ok(mut entries) = self.entries.write() {
                // Re-check under the write lock; a concurrent set may have
                // refreshed the entry in the meantime.
                if let Some(entry) = entries.get(key) {
                    if Instant::now() > entry.expires_at {
                        entries.remove(key);
                    }
                }
            }
        }

        None
    }

    /// Fetch and deserialize a cached value. A payload that no longer
    /// deserializes to `T` is treated as a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Remove a single entry; no-op if absent.
    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Remove every entry whose key starts with `prefix` (byte-exact,
    /// case-sensitive). Used to invalidate whole query families after a
    /// mutation that could change list membership or contents.
    pub fn clear_prefix(&self, prefix: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| !key.starts_with(prefix));
        }
    }

    /// Remove every entry. Called on logout and on authentication failure so
    /// a subsequent (possibly different) user never sees stale data.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of stored entries, including expired-but-unread ones.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.len())
            .finish()
    }
}
