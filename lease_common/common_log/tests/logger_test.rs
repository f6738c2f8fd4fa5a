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

use common_log::config::{LogConfig, LoggerConfig};

fn logger(prefix: &str, file: &str, level: &str) -> LoggerConfig {
    LoggerConfig {
        path_prefix: prefix.to_string(),
        log_directory: "logs".to_string(),
        log_file_name: file.to_string(),
        max_file_size: 1024 * 1024,
        max_zip_count: 2,
        level: level.to_string(),
    }
}

#[test]
fn test_init_writes_root_and_module_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogConfig {
        output_dir: dir.path().display().to_string(),
        console: false,
        loggers: vec![
            logger("root", "root.log", "info"),
            logger("logger_test::lock", "lock.log", "debug"),
        ],
    };

    common_log::init_with_config(config.clone()).unwrap();
    log::info!("root message");
    log::debug!(target: "logger_test::lock", "lock message");
    log::logger().flush();

    let root = std::fs::read_to_string(dir.path().join("logs/root.log")).unwrap();
    let lock = std::fs::read_to_string(dir.path().join("logs/lock.log")).unwrap();
    assert!(root.contains("root message"));
    assert!(!root.contains("lock message"));
    assert!(lock.contains("lock message"));

    assert!(common_log::init_with_config(config).is_err());
}
