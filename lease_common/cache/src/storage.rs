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

use std::time::Duration;

use log::{info, warn};

use crate::client::RedisClient;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::memory::MemoryCache;

/// Backend chosen once by `Storage::init`
pub enum StorageBackend {
    /// Shared store, visible to every process using the same redis
    Shared(RedisClient),
    /// Process-local fallback
    Local(MemoryCache),
}

/// Short-lived key/value storage used by components that tolerate a process-local fallback,
/// such as verification codes.
pub struct Storage {
    backend: StorageBackend,
    default_ttl: Duration,
}

impl Storage {
    /// Selects the shared store when `redis_url` is configured, otherwise the memory cache.
    ///
    /// # Errors
    ///
    /// * `CacheError::ConfigError` - If the configuration is out of range.
    /// * `CacheError::ConnectionError` - If a store is configured but cannot be reached.
    pub async fn init(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        let backend = match config.redis_url.as_deref() {
            Some(url) => {
                let client = RedisClient::connect(url).await?;
                info!("storage backed by shared redis store");
                StorageBackend::Shared(client)
            }
            None => {
                warn!("no redis configured, storage falls back to process-local memory cache");
                StorageBackend::Local(MemoryCache::new(config.default_ttl(), config.max_entries))
            }
        };
        Ok(Self::with_backend(backend, config.default_ttl()))
    }

    pub fn with_backend(backend: StorageBackend, default_ttl: Duration) -> Self {
        Self { backend, default_ttl }
    }

    /// Stores `value` with the configured default expiration.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        match &self.backend {
            StorageBackend::Shared(client) => client.set(key, value, Some(self.default_ttl)).await,
            StorageBackend::Local(cache) => {
                cache.set(key, value, Some(self.default_ttl));
                Ok(())
            }
        }
    }

    /// Reads `key`, deleting it afterwards when `clear` is set.
    ///
    /// # Errors
    ///
    /// * `CacheError::KeyNotFound` - If the key does not exist or has expired.
    /// * `CacheError::OperationError` - If `clear` is set and the value could not be removed.
    pub async fn get(&self, key: &str, clear: bool) -> Result<String> {
        match &self.backend {
            StorageBackend::Shared(client) => {
                let value = client.get(key).await?.ok_or(CacheError::KeyNotFound)?;
                if clear {
                    client.del(key).await.map_err(|e| {
                        warn!("clear key {} after read failed: {}", key, e);
                        CacheError::OperationError(format!("clear key {} after read failed: {}", key, e))
                    })?;
                }
                Ok(value)
            }
            StorageBackend::Local(cache) => {
                let value = cache.get(key).ok_or(CacheError::KeyNotFound)?;
                if clear {
                    cache.delete(key);
                }
                Ok(value)
            }
        }
    }

    /// The shared store, `None` for the process-local fallback.
    pub fn shared(&self) -> Option<&RedisClient> {
        match &self.backend {
            StorageBackend::Shared(client) => Some(client),
            StorageBackend::Local(_) => None,
        }
    }

    pub fn is_shared(&self) -> bool {
        self.shared().is_some()
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}
