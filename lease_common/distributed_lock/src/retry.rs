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

use log::{error, info};
use tokio::time::sleep;

use super::error::{DistributedLockError, Result};
use super::lock::{DistributedLock, LockFactory};
use super::store::LockStore;

/// Caller-side acquisition retry. Each attempt uses a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first, 0 behaves as 1
    pub max_attempts: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

impl<S: LockStore> LockFactory<S> {
    /// Acquires `key`, retrying only while another holder has it.
    ///
    /// # Errors
    ///
    /// * `DistributedLockError::AlreadyLocked` - Still locked after `max_attempts`.
    /// * Any other acquisition error, returned at once.
    pub async fn acquire_with_retry(
        &self,
        key: impl Into<String>,
        lease_seconds: u64,
        owner_value: impl Into<String>,
        policy: &RetryPolicy,
    ) -> Result<DistributedLock<S>> {
        let key = key.into();
        let owner_value = owner_value.into();
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.acquire(key.as_str(), lease_seconds, owner_value.as_str()).await {
                Ok(lock) => return Ok(lock),
                Err(DistributedLockError::AlreadyLocked(_)) if attempt < max_attempts => {
                    info!(
                        "Failed to acquire lock {}, retrying... (attempt {}/{})",
                        key, attempt, max_attempts
                    );
                    sleep(policy.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Failed to acquire lock {}: {}", key, e);
                    return Err(e);
                }
            }
        }
    }
}
