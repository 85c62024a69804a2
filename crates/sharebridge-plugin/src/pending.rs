// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pending share sheets, keyed by the request code each chooser was started
// with. The activity-result callback fires the matching entry exactly once.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sharebridge_core::config::PendingPolicy;
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::ShareResponse;
use sharebridge_native::RESULT_OK;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// First request code handed out. Codes stay below 16 bits because
/// `startActivityForResult` rejects anything larger from fragments.
pub const FIRST_REQUEST_CODE: i32 = 300;

/// Number of distinct codes before allocation wraps back to the first.
const REQUEST_CODE_SPAN: i32 = 0x1000;

struct Table {
    waiting: HashMap<i32, oneshot::Sender<bool>>,
    next: i32,
    policy: PendingPolicy,
}

impl Table {
    fn allocate(&mut self) -> Option<i32> {
        for _ in 0..REQUEST_CODE_SPAN {
            let code = self.next;
            self.next = FIRST_REQUEST_CODE + (code - FIRST_REQUEST_CODE + 1) % REQUEST_CODE_SPAN;
            if !self.waiting.contains_key(&code) {
                return Some(code);
            }
        }
        None
    }
}

/// Shared handle to the table of share sheets awaiting a result.
///
/// Cloning is cheap; all clones see the same table.
#[derive(Clone)]
pub struct PendingShares {
    table: Arc<Mutex<Table>>,
}

impl PendingShares {
    pub fn new(policy: PendingPolicy) -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                waiting: HashMap::new(),
                next: FIRST_REQUEST_CODE,
                policy,
            })),
        }
    }

    /// Reserve a request code for a chooser about to be launched.
    pub fn register(&self) -> Result<PendingShare> {
        let mut table = self.table.lock();
        if table.policy == PendingPolicy::RejectWhileAwaiting {
            if let Some(&code) = table.waiting.keys().next() {
                return Err(ShareError::ShareInProgress(code));
            }
        }
        let code = table
            .allocate()
            .ok_or_else(|| ShareError::Platform("too many share sheets awaiting a result".into()))?;
        let (tx, rx) = oneshot::channel();
        table.waiting.insert(code, tx);
        debug!(request_code = code, pending = table.waiting.len(), "share registered");
        Ok(PendingShare {
            request_code: code,
            receiver: rx,
        })
    }

    /// Deliver an activity result. Returns `false` for codes this table
    /// never issued or already resolved.
    pub fn complete(&self, request_code: i32, result_code: i32) -> bool {
        let Some(tx) = self.table.lock().waiting.remove(&request_code) else {
            debug!(request_code, "activity result for an unknown request code");
            return false;
        };
        let completed = result_code == RESULT_OK;
        if tx.send(completed).is_err() {
            warn!(request_code, "share result arrived after the caller stopped waiting");
        }
        true
    }

    /// Drop the entry for a chooser that failed to launch.
    pub fn cancel(&self, request_code: i32) {
        self.table.lock().waiting.remove(&request_code);
    }

    pub fn len(&self) -> usize {
        self.table.lock().waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One launched chooser waiting for its activity result.
#[derive(Debug)]
pub struct PendingShare {
    request_code: i32,
    receiver: oneshot::Receiver<bool>,
}

impl PendingShare {
    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    /// Wait for the activity result.
    pub async fn outcome(self) -> Result<ShareResponse> {
        self.receiver
            .await
            .map(|completed| ShareResponse { completed })
            .map_err(|_| {
                ShareError::Platform("share sheet was abandoned before it reported a result".into())
            })
    }
}
