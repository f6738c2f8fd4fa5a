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

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{DistributedLockError, Result};

/// Minimum lease, shorter leases would renew more than once per second
pub const MIN_LEASE_SECONDS: u64 = 2;

const DEFAULT_KEY_PREFIX: &str = "lock:";

/// How renewal and release treat a key that may now belong to someone else
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMode {
    /// Plain EXPIRE and DEL on the namespaced key. A holder whose lease lapsed will delete the
    /// key of whoever acquired it next.
    #[default]
    Unchecked,
    /// Compare the stored value with the owner value before EXPIRE or DEL.
    OwnerChecked,
}

/// Distributed lock configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LockConfig {
    /// Prefix applied to every lock key in the store
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default)]
    pub release_mode: ReleaseMode,
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            release_mode: ReleaseMode::default(),
        }
    }
}

impl LockConfig {
    pub fn owner_checked() -> Self {
        Self {
            release_mode: ReleaseMode::OwnerChecked,
            ..Self::default()
        }
    }

    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DistributedLockError::InvalidArgument(format!("read {} failed: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| DistributedLockError::InvalidArgument(e.to_string()))
    }

    /// Key under which `key` is stored
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}
