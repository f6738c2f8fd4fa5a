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

use cache::CacheError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributedLockError {
    #[error("Lease must be at least {min} seconds, got {actual}")]
    InvalidLease { min: u64, actual: u64 },

    #[error("Distributed lock store unavailable: {0}")]
    Unavailable(String),

    #[error("Lock {0} is already locked")]
    AlreadyLocked(String),

    #[error("Lock store operation failed: {0}")]
    Store(#[from] CacheError),

    #[error("Lease renewal for {key} stopped: {reason}")]
    RenewalLapsed { key: String, reason: String },

    #[error("Release lock {key} failed: {reason}")]
    ReleaseFailed { key: String, reason: String },

    #[error("Lock {0} is not held or already released")]
    NotHeld(String),

    #[error("Parameter error: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, DistributedLockError>;
