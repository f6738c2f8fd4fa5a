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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cache::{CacheConfig, RedisClient, Storage};
use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::client::LockRedisClient;
use super::config::{LockConfig, ReleaseMode, MIN_LEASE_SECONDS};
use super::error::{DistributedLockError, Result};
use super::store::LockStore;
use super::watchdog::Watchdog;

/// A held lease on a named resource.
///
/// A handle only exists after a successful acquisition and is never re-acquired. While it is held
/// a background task refreshes the lease every `lease_seconds / 2` seconds.
pub struct DistributedLock<S: LockStore> {
    /// Lock key name, without the store prefix
    key: String,
    namespaced_key: String,
    /// Value stored with the key, identifies the holder
    owner_value: String,
    /// Lease applied at acquisition and on every renewal (seconds)
    lease_seconds: u64,
    mode: ReleaseMode,
    status: Arc<AtomicBool>,
    cancel: Option<mpsc::Sender<()>>,
    watchdog: Option<JoinHandle<()>>,
    store: Arc<S>,
}

impl<S: LockStore> DistributedLock<S> {
    /// Makes exactly one attempt to acquire `key`.
    ///
    /// # Arguments
    ///
    /// * `store` - Shared store the lease lives in
    /// * `config` - Key prefix and release mode
    /// * `key` - Resource name
    /// * `lease_seconds` - Lease duration, at least `MIN_LEASE_SECONDS`
    /// * `owner_value` - Value stored with the key to identify the holder
    ///
    /// # Errors
    ///
    /// * `DistributedLockError::InvalidLease` - Lease below the minimum, the store is not touched.
    /// * `DistributedLockError::AlreadyLocked` - Another holder has the key.
    /// * `DistributedLockError::Store` - The store call failed.
    pub async fn acquire(
        store: Arc<S>,
        config: &LockConfig,
        key: impl Into<String>,
        lease_seconds: u64,
        owner_value: impl Into<String>,
    ) -> Result<Self> {
        if lease_seconds < MIN_LEASE_SECONDS {
            return Err(DistributedLockError::InvalidLease {
                min: MIN_LEASE_SECONDS,
                actual: lease_seconds,
            });
        }
        let key = key.into();
        if key.is_empty() {
            return Err(DistributedLockError::InvalidArgument("lock key is empty".to_string()));
        }
        let owner_value = owner_value.into();
        let namespaced_key = config.namespaced(&key);

        if !store.set_if_absent(&namespaced_key, &owner_value, lease_seconds).await? {
            return Err(DistributedLockError::AlreadyLocked(key));
        }

        let status = Arc::new(AtomicBool::new(true));
        let (cancel, watchdog) = Watchdog {
            store: Arc::clone(&store),
            key: namespaced_key.clone(),
            owner_value: owner_value.clone(),
            lease_seconds,
            mode: config.release_mode,
            status: Arc::clone(&status),
        }
        .spawn();
        info!("acquired lock {} for {}s", namespaced_key, lease_seconds);

        Ok(Self {
            key,
            namespaced_key,
            owner_value,
            lease_seconds,
            mode: config.release_mode,
            status,
            cancel: Some(cancel),
            watchdog: Some(watchdog),
            store,
        })
    }

    /// Stops renewal, then deletes the key.
    ///
    /// In `ReleaseMode::Unchecked` the key is deleted whatever its value, so a holder whose lease
    /// already lapsed removes the lease of the next holder and still reports success.
    ///
    /// # Errors
    ///
    /// * `DistributedLockError::NotHeld` - Already released, the store is not touched.
    /// * `DistributedLockError::ReleaseFailed` - Nothing was deleted, or the delete failed. The
    ///   handle stays held so the delete can be retried.
    pub async fn release(&mut self) -> Result<()> {
        if !self.status.load(Ordering::SeqCst) {
            return Err(DistributedLockError::NotHeld(self.key.clone()));
        }
        self.stop_watchdog().await;

        let deleted = match self.mode {
            ReleaseMode::Unchecked => self.store.delete(&self.namespaced_key).await,
            ReleaseMode::OwnerChecked => {
                self.store
                    .delete_if_owner(&self.namespaced_key, &self.owner_value)
                    .await
            }
        };
        match deleted {
            Ok(1) => {
                self.status.store(false, Ordering::SeqCst);
                info!("released lock {}", self.namespaced_key);
                Ok(())
            }
            Ok(removed) => {
                warn!("release lock {} removed {} keys", self.namespaced_key, removed);
                Err(DistributedLockError::ReleaseFailed {
                    key: self.key.clone(),
                    reason: "lease expired or held by another owner".to_string(),
                })
            }
            Err(e) => {
                warn!("release lock {} err: {}", self.namespaced_key, e);
                Err(DistributedLockError::ReleaseFailed {
                    key: self.key.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Remaining lease as seen by the store, `None` when the key is gone.
    pub async fn remaining_ttl(&self) -> Result<Option<u64>> {
        Ok(self.store.ttl(&self.namespaced_key).await?)
    }

    /// Whether the background renewal task is still running
    pub fn is_renewing(&self) -> bool {
        self.watchdog.as_ref().map_or(false, |handle| !handle.is_finished())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn namespaced_key(&self) -> &str {
        &self.namespaced_key
    }

    pub fn owner_value(&self) -> &str {
        &self.owner_value
    }

    pub fn lease_seconds(&self) -> u64 {
        self.lease_seconds
    }

    pub fn is_held(&self) -> bool {
        self.status.load(Ordering::SeqCst)
    }

    async fn stop_watchdog(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // Full or closed both mean the task is already stopping.
            let _ = cancel.try_send(());
        }
        if let Some(watchdog) = self.watchdog.take() {
            if let Err(e) = watchdog.await {
                warn!("watchdog for {} ended abnormally: {}", self.namespaced_key, e);
            }
        }
    }
}

impl<S: LockStore> Drop for DistributedLock<S> {
    fn drop(&mut self) {
        if self.status.swap(false, Ordering::SeqCst) && self.cancel.is_some() {
            warn!(
                "lock {} dropped while held, renewal stopped and the lease lapses within {}s",
                self.namespaced_key, self.lease_seconds
            );
        }
    }
}

/// Creates lock handles against one store with one configuration
pub struct LockFactory<S: LockStore> {
    store: Arc<S>,
    config: LockConfig,
}

impl<S: LockStore> Clone for LockFactory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: LockStore> LockFactory<S> {
    pub fn new(store: Arc<S>, config: LockConfig) -> Self {
        Self { store, config }
    }

    /// See `DistributedLock::acquire`
    pub async fn acquire(
        &self,
        key: impl Into<String>,
        lease_seconds: u64,
        owner_value: impl Into<String>,
    ) -> Result<DistributedLock<S>> {
        DistributedLock::acquire(Arc::clone(&self.store), &self.config, key, lease_seconds, owner_value).await
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl LockFactory<LockRedisClient> {
    /// Builds a factory on the shared store of `storage`.
    ///
    /// # Errors
    ///
    /// * `DistributedLockError::Unavailable` - Only the process-local cache is configured.
    pub fn from_storage(storage: &Storage, config: LockConfig) -> Result<Self> {
        let client = storage.shared().ok_or_else(|| {
            DistributedLockError::Unavailable("only a process-local cache is configured".to_string())
        })?;
        Ok(Self::new(Arc::new(LockRedisClient::new(client.clone())), config))
    }

    /// Connects to the store named in `cache_config`.
    ///
    /// # Errors
    ///
    /// * `DistributedLockError::Unavailable` - No store configured, or it cannot be reached.
    pub async fn connect(cache_config: &CacheConfig, config: LockConfig) -> Result<Self> {
        let url = cache_config
            .redis_url
            .as_deref()
            .ok_or_else(|| DistributedLockError::Unavailable("redis url is not configured".to_string()))?;
        let client = RedisClient::connect(url)
            .await
            .map_err(|e| DistributedLockError::Unavailable(e.to_string()))?;
        Ok(Self::new(Arc::new(LockRedisClient::new(client)), config))
    }
}

/// Random owner value for holders without a natural identity
pub fn new_owner_value() -> String {
    Uuid::new_v4().to_string()
}
