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

//! Store clients shared by the lease components: a redis-backed client for data that must be
//! visible across processes, an in-process memory cache, and the `Storage` capability that
//! picks one of them at start-up.

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod operations;
pub mod storage;

pub use client::RedisClient;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use storage::Storage;
