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

use crate::client::RedisClient;
use crate::error::{CacheError, Result};

impl RedisClient {
    /// Sets the value for a given key in Redis.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to set.
    /// * `value` - The value to store.
    /// * `ttl` - An optional duration for the key's expiration.
    ///
    /// # Errors
    /// * `CacheError::ConnectionError` - If the command fails.
    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs());
        }
        cmd.query_async::<_, ()>(&mut conn).await.map_err(CacheError::ConnectionError)
    }

    /// Gets the value for a given key, `None` when the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)
    }

    /// Deletes a key, returning the number of keys removed (0 or 1).
    pub async fn del(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection();
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection();
        redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)
    }

    /// Sets the expiration time for an existing key.
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` when the key does not exist, the store creates nothing in that case.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection();
        redis::cmd("EXPIRE")
            .arg(key)
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)
    }

    /// Gets the remaining time to live in seconds.
    ///
    /// Follows the store convention: `-2` when the key does not exist, `-1` when it has no expiry.
    pub async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection();
        redis::cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)
    }

    /// Sets a key only if it does not already exist, with the expiration applied in the same
    /// command so no key is ever left without a TTL.
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` when the key was created, `Ok(false)` when it already existed.
    pub async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(CacheError::ConnectionError)?;
        Ok(reply.is_some())
    }
}
