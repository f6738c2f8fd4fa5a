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

use std::fmt;

use log::info;
use redis::aio::ConnectionManager;
use redis::Client;

use crate::error::{CacheError, Result};

/// Handle to a shared redis store.
///
/// Cloning is cheap, all clones multiplex over the same managed connection which reconnects on
/// its own after transport failures.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Opens a client for `redis_url` and establishes the managed connection.
    ///
    /// # Errors
    ///
    /// * `CacheError::ConfigError` - If the url is empty.
    /// * `CacheError::ConnectionError` - If the url is malformed or the store cannot be reached.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        if redis_url.trim().is_empty() {
            return Err(CacheError::ConfigError("redis url is empty".to_string()));
        }
        let client = Client::open(redis_url).map_err(CacheError::ConnectionError)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(CacheError::ConnectionError)?;
        info!("redis connection manager established");
        Ok(Self { manager })
    }

    /// Returns a connection usable with `redis::cmd` and `redis::Script`.
    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient").finish_non_exhaustive()
    }
}
