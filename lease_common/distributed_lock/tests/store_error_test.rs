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

use std::sync::Arc;

use async_trait::async_trait;
use cache::CacheError;
use distributed_lock::{DistributedLockError, LockConfig, LockFactory, LockStore};
use mockall::*;

mock! {
    pub Store {}

    #[async_trait]
    impl LockStore for Store {
        async fn set_if_absent(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError>;
        async fn refresh_ttl(&self, key: &str, ttl: u64) -> Result<bool, CacheError>;
        async fn delete(&self, key: &str) -> Result<u64, CacheError>;
        async fn refresh_ttl_if_owner(&self, key: &str, value: &str, ttl: u64) -> Result<bool, CacheError>;
        async fn delete_if_owner(&self, key: &str, value: &str) -> Result<u64, CacheError>;
        async fn ttl(&self, key: &str) -> Result<Option<u64>, CacheError>;
    }
}

#[tokio::test]
async fn test_acquire_store_error_returned_unchanged() {
    let mut mock = MockStore::new();
    mock.expect_set_if_absent()
        .times(1)
        .returning(|_, _, _| Err(CacheError::OperationError("broken pipe".to_string())));

    let factory = LockFactory::new(Arc::new(mock), LockConfig::default());
    let result = factory.acquire("job", 4, "owner").await;
    match result {
        Err(DistributedLockError::Store(CacheError::OperationError(msg))) => assert_eq!(msg, "broken pipe"),
        other => panic!("unexpected acquire result: {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_acquire_sends_namespaced_key_and_lease() {
    let mut mock = MockStore::new();
    mock.expect_set_if_absent()
        .times(1)
        .returning(|key, value, ttl| {
            assert_eq!(key, "lock:job-42");
            assert_eq!(value, "worker-7");
            assert_eq!(ttl, 4);
            Ok(false)
        });

    let factory = LockFactory::new(Arc::new(mock), LockConfig::default());
    let result = factory.acquire("job-42", 4, "worker-7").await;
    assert!(matches!(result, Err(DistributedLockError::AlreadyLocked(key)) if key == "job-42"));
}

#[tokio::test]
async fn test_remaining_ttl_reports_store_value() {
    let mut mock = MockStore::new();
    mock.expect_set_if_absent().returning(|_, _, _| Ok(true));
    mock.expect_refresh_ttl().returning(|_, _| Ok(true));
    mock.expect_ttl().returning(|_| Ok(Some(7)));
    mock.expect_delete().times(1).returning(|_| Ok(1));

    let factory = LockFactory::new(Arc::new(mock), LockConfig::default());
    let mut lock = factory.acquire("job", 8, "owner").await.unwrap();
    assert_eq!(lock.remaining_ttl().await.unwrap(), Some(7));
    lock.release().await.unwrap();
}

#[tokio::test]
async fn test_release_zero_deleted_is_release_failed() {
    let mut mock = MockStore::new();
    mock.expect_set_if_absent().returning(|_, _, _| Ok(true));
    mock.expect_refresh_ttl().returning(|_, _| Ok(true));
    mock.expect_delete().times(1).returning(|_| Ok(0));

    let factory = LockFactory::new(Arc::new(mock), LockConfig::default());
    let mut lock = factory.acquire("job", 4, "owner").await.unwrap();
    let result = lock.release().await;
    assert!(matches!(result, Err(DistributedLockError::ReleaseFailed { .. })));
}

#[tokio::test]
async fn test_owner_checked_release_uses_owner_value() {
    let mut mock = MockStore::new();
    mock.expect_set_if_absent().returning(|_, _, _| Ok(true));
    mock.expect_refresh_ttl_if_owner().returning(|_, _, _| Ok(true));
    mock.expect_delete().never();
    mock.expect_delete_if_owner()
        .times(1)
        .returning(|key, value| {
            assert_eq!(key, "lock:job");
            assert_eq!(value, "owner");
            Ok(1)
        });

    let factory = LockFactory::new(Arc::new(mock), LockConfig::owner_checked());
    let mut lock = factory.acquire("job", 4, "owner").await.unwrap();
    lock.release().await.unwrap();
}
