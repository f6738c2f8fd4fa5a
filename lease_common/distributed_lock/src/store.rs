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

use async_trait::async_trait;
use cache::CacheError;

/// Atomic primitives the lock needs from a shared store.
///
/// Every key passed in is already namespaced. TTLs are whole seconds.
#[async_trait]
pub trait LockStore: Send + Sync + 'static {
    /// Creates `key` with `value` and `ttl` only if it does not exist.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError>;

    /// Resets the expiration of an existing key. `Ok(false)` when the key is gone.
    async fn refresh_ttl(&self, key: &str, ttl: u64) -> Result<bool, CacheError>;

    /// Deletes `key` regardless of its value, returning the number of keys removed.
    async fn delete(&self, key: &str) -> Result<u64, CacheError>;

    /// Like `refresh_ttl`, but only while the stored value equals `value`.
    async fn refresh_ttl_if_owner(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError>;

    /// Like `delete`, but only while the stored value equals `value`.
    async fn delete_if_owner(&self, key: &str, value: &str) -> Result<u64, CacheError>;

    /// Remaining expiration, `None` when the key does not exist or never expires.
    async fn ttl(&self, key: &str) -> Result<Option<u64>, CacheError>;
}
