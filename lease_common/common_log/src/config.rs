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

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Base directory every `log_directory` is resolved against
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Mirror root logger output to stdout
    #[serde(default)]
    pub console: bool,
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub path_prefix: String,
    pub log_directory: String,
    pub log_file_name: String,
    pub max_file_size: u64,
    pub max_zip_count: u32,
    pub level: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl LogConfig {
    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_str = std::fs::read_to_string(path.into())?;
        let config: LogConfig = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn get_logger_config(&self, path_prefix: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| path_prefix.starts_with(&l.path_prefix))
    }

    pub fn get_root_config(&self) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| l.path_prefix == "root")
    }

    /// Loggers other than root, each becomes a non-additive module logger
    pub fn module_configs(&self) -> impl Iterator<Item = &LoggerConfig> {
        self.loggers.iter().filter(|l| l.path_prefix != "root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
output_dir: /var/log/lease
loggers:
  - path_prefix: root
    log_directory: logs
    log_file_name: root.log
    max_file_size: 10485760
    max_zip_count: 6
    level: info
  - path_prefix: distributed_lock
    log_directory: logs
    log_file_name: lock.log
    max_file_size: 10485760
    max_zip_count: 3
    level: debug
"#;

    #[test]
    fn test_parse_config() {
        let config: LogConfig = serde_yaml::from_str(YAML).unwrap();
        assert_eq!(config.output_dir, "/var/log/lease");
        assert!(!config.console);
        assert_eq!(config.get_root_config().unwrap().log_file_name, "root.log");
        assert_eq!(config.module_configs().count(), 1);
        let lock = config.get_logger_config("distributed_lock::watchdog").unwrap();
        assert_eq!(lock.level, "debug");
    }

    #[test]
    fn test_shipped_config_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/logging.yaml");
        let config = LogConfig::from_yaml(path).unwrap();
        assert!(config.console);
        assert!(config.get_root_config().is_some());
    }

    #[test]
    fn test_missing_file() {
        assert!(LogConfig::from_yaml("/nonexistent/logging.yaml").is_err());
    }
}
