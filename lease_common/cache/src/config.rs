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

//! Cache configuration
//! Reads the store address and memory cache limits from YAML or environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{CacheError, Result};

const DEFAULT_TTL_SECS: u64 = 300;
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Longest expiration accepted anywhere in the cache (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Cache configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Redis connection URL, the memory cache is used when absent
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Expiration applied by `Storage::set` (seconds), 1..=`MAX_TTL_SECS`
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
    /// Capacity of the memory cache
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_max_entries() -> u64 {
    DEFAULT_MAX_ENTRIES
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            default_ttl_secs: DEFAULT_TTL_SECS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Loads cache configuration from a YAML file.
    ///
    /// Missing fields take their defaults, an empty `redis_url` is treated as absent.
    ///
    /// # Errors
    ///
    /// * `CacheError::ConfigError` - If the file cannot be read or parsed, or a value is out of range.
    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CacheError::ConfigError(format!("read {} failed: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut config: CacheConfig = serde_yaml::from_str(content)
            .map_err(|e| CacheError::ConfigError(e.to_string()))?;
        config.redis_url = config.redis_url.filter(|url| !url.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Loads cache configuration from environment variables.
    ///
    /// A `.env` file is loaded first when one can be found. `REDIS_URL` selects the shared store,
    /// `CACHE_DEFAULT_TTL` and `CACHE_MAX_ENTRIES` fall back to their defaults when unset or not
    /// a number.
    ///
    /// # Errors
    ///
    /// * `CacheError::ConfigError` - If a value is out of range.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            info!("load .env file: {}", path.display());
        }
        let redis_url = env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());
        if redis_url.is_none() {
            debug!("REDIS_URL not set, memory cache will be used");
        }
        let config = Self {
            redis_url,
            default_ttl_secs: env_u64("CACHE_DEFAULT_TTL", DEFAULT_TTL_SECS),
            max_entries: env_u64("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_ttl_secs == 0 || self.default_ttl_secs > MAX_TTL_SECS {
            return Err(CacheError::ConfigError(format!(
                "default_ttl_secs must be between 1 and {}, got {}",
                MAX_TTL_SECS, self.default_ttl_secs
            )));
        }
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("{} is not a valid number: {}, use default {}", key, value, default);
            default
        }),
        Err(_) => default,
    }
}
