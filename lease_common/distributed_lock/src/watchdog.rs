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

//! Background lease renewal bound one-to-one to a held lock

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::ReleaseMode;
use crate::error::{DistributedLockError, Result};
use crate::store::LockStore;

pub(crate) struct Watchdog<S: LockStore> {
    pub(crate) store: Arc<S>,
    pub(crate) key: String,
    pub(crate) owner_value: String,
    pub(crate) lease_seconds: u64,
    pub(crate) mode: ReleaseMode,
    pub(crate) status: Arc<AtomicBool>,
}

impl<S: LockStore> Watchdog<S> {
    /// Starts renewing. Sending on, or dropping, the returned sender stops the task.
    pub(crate) fn spawn(self) -> (mpsc::Sender<()>, JoinHandle<()>) {
        let (cancel_tx, cancel_rx) = mpsc::channel(1);
        let handle = tokio::spawn(self.run(cancel_rx));
        (cancel_tx, handle)
    }

    async fn run(self, mut cancel: mpsc::Receiver<()>) {
        let period = Duration::from_secs(self.lease_seconds / 2);
        loop {
            if !matches!(cancel.try_recv(), Err(TryRecvError::Empty)) {
                debug!("watchdog for {} cancelled", self.key);
                return;
            }
            if !self.status.load(Ordering::SeqCst) {
                debug!("watchdog for {} stopped, lock no longer held", self.key);
                return;
            }
            // Fail-stop: the lease lapses at its TTL, the holder finds out on release.
            if let Err(e) = self.renew().await {
                warn!("watchdog: {}", e);
                return;
            }
            tokio::select! {
                biased;
                _ = cancel.recv() => {
                    debug!("watchdog for {} cancelled", self.key);
                    return;
                }
                _ = sleep(period) => {}
            }
        }
    }

    async fn renew(&self) -> Result<()> {
        let refreshed = match self.mode {
            ReleaseMode::Unchecked => self.store.refresh_ttl(&self.key, self.lease_seconds).await,
            ReleaseMode::OwnerChecked => {
                self.store
                    .refresh_ttl_if_owner(&self.key, &self.owner_value, self.lease_seconds)
                    .await
            }
        };
        match refreshed {
            Ok(true) => {
                debug!("renewed {} for {}s", self.key, self.lease_seconds);
                Ok(())
            }
            Ok(false) => Err(DistributedLockError::RenewalLapsed {
                key: self.key.clone(),
                reason: match self.mode {
                    ReleaseMode::Unchecked => "key no longer exists".to_string(),
                    ReleaseMode::OwnerChecked => "key no longer exists or has another owner".to_string(),
                },
            }),
            Err(e) => Err(DistributedLockError::RenewalLapsed {
                key: self.key.clone(),
                reason: e.to_string(),
            }),
        }
    }
}
