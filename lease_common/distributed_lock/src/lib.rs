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

//! Lease-based distributed lock on a shared redis store.
//!
//! A lock is taken with a single atomic `SET NX EX` on `<prefix><key>`, kept alive by a
//! background task that refreshes the TTL every half lease, and released by stopping that task
//! before deleting the key.
//!
//! # Example
//! ```no_run
//! use cache::CacheConfig;
//! use distributed_lock::{LockConfig, LockFactory};
//!
//! # async fn run() -> distributed_lock::Result<()> {
//! let cache_config = CacheConfig::from_env()?;
//! let factory = LockFactory::connect(&cache_config, LockConfig::default()).await?;
//! let mut lock = factory.acquire("job-42", 4, distributed_lock::new_owner_value()).await?;
//! // exclusive work
//! lock.release().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod lock;
pub mod retry;
pub mod scripts;
pub mod store;
mod watchdog;

pub use client::LockRedisClient;
pub use config::{LockConfig, ReleaseMode, MIN_LEASE_SECONDS};
pub use error::{DistributedLockError, Result};
pub use lock::{new_owner_value, DistributedLock, LockFactory};
pub use retry::RetryPolicy;
pub use store::LockStore;
