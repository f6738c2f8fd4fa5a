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

use async_trait::async_trait;
use cache::{CacheError, RedisClient};

use super::scripts::{EXTEND_LOCK, RELEASE_LOCK};
use super::store::LockStore;

/// Redis client side encapsulation, providing distributed lock related operations
#[derive(Debug, Clone)]
pub struct LockRedisClient {
    client: RedisClient,
}

impl LockRedisClient {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl LockStore for LockRedisClient {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError> {
        self.client.set_nx(key, value, Duration::from_secs(ttl)).await
    }

    async fn refresh_ttl(&self, key: &str, ttl: u64) -> Result<bool, CacheError> {
        self.client.expire(key, Duration::from_secs(ttl)).await
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        self.client.del(key).await
    }

    async fn refresh_ttl_if_owner(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError> {
        let mut conn = self.client.connection();
        let result: i64 = redis::Script::new(EXTEND_LOCK)
            .key(key)
            .arg(value)
            .arg(ttl)
            .invoke_async(&mut conn)
            .await?;
        Ok(result == 1)
    }

    async fn delete_if_owner(&self, key: &str, value: &str) -> Result<u64, CacheError> {
        let mut conn = self.client.connection();
        let removed: u64 = redis::Script::new(RELEASE_LOCK)
            .key(key)
            .arg(value)
            .invoke_async(&mut conn)
            .await?;
        Ok(removed)
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, CacheError> {
        let ttl = self.client.ttl(key).await?;
        Ok(u64::try_from(ttl).ok().filter(|ttl| *ttl > 0))
    }
}
