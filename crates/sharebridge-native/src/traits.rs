// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native capabilities ShareBridge
// drives: launching intents, querying installed packages, rasterizing the web
// view, staging share files, and persisting to the gallery.

use std::path::Path;

use sharebridge_core::error::Result;
use sharebridge_core::types::CapturedSurface;

use crate::intent::Intent;

/// Result code the OS reports when the user completed an activity.
pub const RESULT_OK: i32 = -1;

/// Result code for a dismissed or cancelled activity.
pub const RESULT_CANCELED: i32 = 0;

/// Unified bridge that groups the native capabilities the share operations
/// need. Shared between the UI-affine operations and the blocking pool, so
/// implementations must be `Send + Sync`.
pub trait PlatformBridge:
    NativeIntents + NativePackages + NativeSurface + NativeShareCache + Send + Sync
{
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Launch and broadcast intents.
pub trait NativeIntents {
    /// `startActivity(intent)`. Fire-and-forget: success means the OS
    /// accepted the intent. Fails with `NoHandler` when nothing resolves it.
    fn start_activity(&self, intent: &Intent) -> Result<()>;

    /// Wrap `intent` in a chooser titled `title` and start it for a result.
    ///
    /// The outcome arrives later through the host activity's
    /// `onActivityResult` with `request_code`.
    fn start_chooser(&self, intent: &Intent, title: &str, request_code: i32) -> Result<()>;

    /// Bring an installed app to the foreground via its launcher intent.
    /// Returns `Ok(false)` if the package has no launcher intent.
    fn launch_package(&self, package: &str) -> Result<bool>;

    /// `sendBroadcast(intent)`.
    fn send_broadcast(&self, intent: &Intent) -> Result<()>;
}

/// Package-manager queries.
pub trait NativePackages {
    /// Whether `package` is installed (exact package name match).
    fn is_installed(&self, package: &str) -> Result<bool>;

    /// Whether at least one activity resolves `intent`.
    fn can_resolve(&self, intent: &Intent) -> Result<bool>;
}

/// Rasterize the surface hosting the web view.
pub trait NativeSurface {
    /// Draw the surface at its native pixel size and read the pixels back.
    ///
    /// Fails with `ShareError::Capture` if the surface is not attached or
    /// has not been laid out. Must be called on the UI thread.
    fn capture_surface(&self) -> Result<CapturedSurface>;
}

/// Temporary files exposed to other apps.
pub trait NativeShareCache {
    /// Write `bytes` to the share cache as `file_name` and return a URI other
    /// apps may read once granted (`content://` on Android).
    fn stage_share_file(&self, bytes: &[u8], file_name: &str) -> Result<String>;
}

/// Persist an image somewhere the device gallery shows it.
///
/// Implementations are picked once at startup by
/// [`gallery_store`](crate::gallery_store); callers never branch on the
/// platform version themselves.
pub trait GalleryStore: Send + Sync {
    /// Store PNG bytes as `file_name` and return a locator for the result
    /// (content URI or absolute path).
    fn persist_png(&self, png: &[u8], file_name: &str) -> Result<String>;

    /// Short name of the strategy, for logs.
    fn strategy(&self) -> &'static str;
}

/// Tell the gallery about a file written directly to storage.
pub trait MediaScanner: Send + Sync {
    fn scan_file(&self, path: &Path) -> Result<()>;
}
