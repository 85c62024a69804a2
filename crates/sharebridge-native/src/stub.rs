// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the Android APIs are unavailable.
//
// Intent launches and package queries return `PlatformUnavailable`; there is
// no web view to capture. Share files are still staged under the system temp
// directory so the staging path behaves the same off-device.

use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::CapturedSurface;

use crate::data_dir;
use crate::intent::Intent;
use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
pub struct StubBridge {
    share_cache_dir: String,
}

impl StubBridge {
    pub fn new(share_cache_dir: impl Into<String>) -> Self {
        Self {
            share_cache_dir: share_cache_dir.into(),
        }
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeIntents for StubBridge {
    fn start_activity(&self, intent: &Intent) -> Result<()> {
        tracing::warn!(
            action = %intent.action,
            "NativeIntents::start_activity called on stub bridge"
        );
        Err(ShareError::PlatformUnavailable)
    }

    fn start_chooser(&self, intent: &Intent, _title: &str, _request_code: i32) -> Result<()> {
        tracing::warn!(
            action = %intent.action,
            "NativeIntents::start_chooser called on stub bridge"
        );
        Err(ShareError::PlatformUnavailable)
    }

    fn launch_package(&self, _package: &str) -> Result<bool> {
        tracing::warn!("NativeIntents::launch_package called on stub bridge");
        Err(ShareError::PlatformUnavailable)
    }

    fn send_broadcast(&self, _intent: &Intent) -> Result<()> {
        Err(ShareError::PlatformUnavailable)
    }
}

impl NativePackages for StubBridge {
    fn is_installed(&self, _package: &str) -> Result<bool> {
        Err(ShareError::PlatformUnavailable)
    }

    fn can_resolve(&self, _intent: &Intent) -> Result<bool> {
        Err(ShareError::PlatformUnavailable)
    }
}

impl NativeSurface for StubBridge {
    fn capture_surface(&self) -> Result<CapturedSurface> {
        tracing::warn!("NativeSurface::capture_surface called on stub bridge");
        Err(ShareError::Capture("no web view surface on this platform".into()))
    }
}

impl NativeShareCache for StubBridge {
    fn stage_share_file(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        let path = data_dir::share_cache_dir(&self.share_cache_dir)?.join(file_name);
        std::fs::write(&path, bytes)?;
        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_are_unavailable() {
        let bridge = StubBridge::new("sharebridge_stub_test");
        let err = bridge.start_activity(&Intent::new("x")).unwrap_err();
        assert!(matches!(err, ShareError::PlatformUnavailable));
    }

    #[test]
    fn capture_reports_capture_error() {
        let bridge = StubBridge::new("sharebridge_stub_test");
        assert!(matches!(
            bridge.capture_surface().unwrap_err(),
            ShareError::Capture(_)
        ));
    }

    #[test]
    fn staging_writes_into_temp_cache() {
        let bridge = StubBridge::new("sharebridge_stub_test");
        let uri = bridge.stage_share_file(b"abc", "stub_stage.png").unwrap();
        let path = uri.strip_prefix("file://").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"abc");
        std::fs::remove_file(path).ok();
    }
}
