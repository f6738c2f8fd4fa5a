/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::time::{Duration, Instant};

use moka::sync::Cache;
use moka::Expiry;

use crate::config::MAX_TTL_SECS;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-process key/value cache with per-entry expiration.
///
/// Only visible to the current process, so it is never a valid backend for the distributed lock.
pub struct MemoryCache {
    cache: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(default_ttl: Duration, max_entries: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_entries)
                .expire_after(PerEntryTtl)
                .build(),
            default_ttl: Self::bounded(default_ttl),
        }
    }

    /// Stores `value` under `key`, replacing any previous entry and its expiration.
    ///
    /// TTLs longer than `MAX_TTL_SECS` are shortened to it.
    pub fn set(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let ttl = ttl.map_or(self.default_ttl, Self::bounded);
        self.cache.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                ttl,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|entry| entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Removes `key`, returning whether a live entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        let live = self.cache.contains_key(key);
        self.cache.invalidate(key);
        live
    }

    /// Number of entries after pending evictions have been applied
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bounded(ttl: Duration) -> Duration {
        ttl.min(Duration::from_secs(MAX_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new(Duration::from_secs(60), 100);
        cache.set("captcha:1", "a7c9", None);
        assert_eq!(cache.get("captcha:1").as_deref(), Some("a7c9"));
        assert_eq!(cache.get("captcha:2"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_expires() {
        let cache = MemoryCache::new(Duration::from_secs(60), 100);
        cache.set("short", "v", Some(Duration::from_millis(20)));
        cache.set("long", "v", None);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get("short"), None);
        assert!(!cache.delete("short"));
        assert!(cache.contains("long"));
    }

    #[test]
    fn test_overwrite_replaces_ttl() {
        let cache = MemoryCache::new(Duration::from_secs(60), 100);
        cache.set("k", "old", Some(Duration::from_millis(20)));
        cache.set("k", "new", None);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_delete() {
        let cache = MemoryCache::new(Duration::from_secs(60), 100);
        cache.set("k", "v", None);
        assert!(cache.delete("k"));
        assert!(!cache.delete("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_oversized_ttl_is_bounded() {
        let cache = MemoryCache::new(Duration::MAX, 100);
        cache.set("default", "v", None);
        cache.set("explicit", "v", Some(Duration::MAX));
        assert_eq!(cache.get("default").as_deref(), Some("v"));
        assert_eq!(cache.get("explicit").as_deref(), Some("v"));
        assert_eq!(cache.default_ttl, Duration::from_secs(MAX_TTL_SECS));
    }
}
