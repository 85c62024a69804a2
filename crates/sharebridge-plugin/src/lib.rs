// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! ShareBridge: share sheet, direct-to-app sharing, screenshots and gallery
//! saving for hybrid web-view apps.
//!
//! [`ShareBridge`] exposes the operations as typed methods and through
//! [`ShareBridge::execute`], the JSON action dispatch a web-view plugin host
//! calls. Native work goes through the `sharebridge-native` capability
//! traits.

pub mod bridge;
pub mod compose;
pub mod dispatch;
pub mod pending;
pub mod targets;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(test)]
mod testing;

pub use bridge::{ScreenshotLaunch, ShareBridge};
pub use dispatch::Action;
pub use pending::{PendingShare, PendingShares};

pub use sharebridge_core::{BridgeConfig, ErrorPayload, ShareError};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
