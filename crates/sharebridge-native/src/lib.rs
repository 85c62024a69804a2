// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! ShareBridge: native platform bridge.
//!
//! Defines the capability traits the share operations drive and the
//! platform dispatch that picks an implementation. Android goes through
//! JNI (`jni` + `ndk-context`); every other target gets a stub so the
//! workspace builds and tests on desktop/CI.

pub mod gallery;
pub mod intent;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
mod data_dir;

#[cfg(not(target_os = "android"))]
pub mod stub;

use sharebridge_core::config::BridgeConfig;
use sharebridge_core::error::Result;

pub use gallery::{DirectoryGallery, PendingEntry, commit_entry};
pub use intent::{Intent, IntentExtra};
pub use traits::*;

/// Retrieves the bridge implementation for the target operating system.
///
/// RETURNS: A boxed trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details.
pub fn platform_bridge(config: &BridgeConfig) -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: Uses `jni-rs` to invoke methods on the JVM/ART.
        Box::new(android::AndroidBridge::new(config))
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: Uses a stub implementation to allow non-native builds.
        Box::new(stub::StubBridge::new(config.share_cache_dir.clone()))
    }
}

/// Selects the gallery persistence strategy once, at startup.
///
/// Android 10+ uses the MediaStore registry; older Android versions and
/// desktop builds write into a Pictures directory.
pub fn gallery_store(config: &BridgeConfig) -> Result<Box<dyn GalleryStore>> {
    #[cfg(target_os = "android")]
    {
        android::gallery_store(config)
    }
    #[cfg(not(target_os = "android"))]
    {
        Ok(Box::new(DirectoryGallery::new(
            data_dir::pictures_dir(),
            &config.gallery_album,
        )))
    }
}
