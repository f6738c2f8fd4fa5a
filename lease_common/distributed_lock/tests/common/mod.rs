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

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use cache::CacheError;
use distributed_lock::LockStore;
use parking_lot::Mutex;
use tokio::time::{Duration, Instant};

/// In-memory store with expiry on the tokio clock, call counters and failure switches
#[derive(Default)]
pub struct FakeStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    pub set_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub fail_refresh: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[allow(dead_code)]
impl FakeStore {
    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone())
    }

    /// Overwrites `key` as an unrelated writer would
    pub fn force_set(&self, key: &str, value: &str, ttl: u64) {
        self.entries
            .lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + Duration::from_secs(ttl)));
    }

    /// Removes `key` behind the holder's back, as an operator or eviction would
    pub fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> CacheError {
        CacheError::OperationError("connection reset by peer".to_string())
    }
}

#[async_trait]
impl LockStore for FakeStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        let now = Instant::now();
        let mut entries = self.entries.lock();
        if entries.get(key).map_or(false, |(_, expires_at)| *expires_at > now) {
            return Ok(false);
        }
        entries.insert(key.to_string(), (value.to_string(), now + Duration::from_secs(ttl)));
        Ok(true)
    }

    async fn refresh_ttl(&self, key: &str, ttl: u64) -> Result<bool, CacheError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some((_, expires_at)) if *expires_at > Instant::now() => {
                *expires_at = Instant::now() + Duration::from_secs(ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let now = Instant::now();
        let removed = self.entries.lock().remove(key);
        Ok(u64::from(removed.map_or(false, |(_, expires_at)| expires_at > now)))
    }

    async fn refresh_ttl_if_owner(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError> {
        if self.value(key).as_deref() != Some(value) {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            return Ok(false);
        }
        self.refresh_ttl(key, ttl).await
    }

    async fn delete_if_owner(&self, key: &str, value: &str) -> Result<u64, CacheError> {
        if self.value(key).as_deref() != Some(value) {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            return Ok(0);
        }
        self.delete(key).await
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let entries = self.entries.lock();
        Ok(entries
            .get(key)
            .map(|(_, expires_at)| expires_at.saturating_duration_since(Instant::now()).as_secs())
            .filter(|secs| *secs > 0))
    }
}
