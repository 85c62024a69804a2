// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording doubles for the native capabilities, used by the unit tests.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use sharebridge_core::config::BridgeConfig;
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::CapturedSurface;
use sharebridge_native::intent::actions;
use sharebridge_native::{
    GalleryStore, Intent, NativeIntents, NativePackages, NativeShareCache, NativeSurface,
    PlatformBridge,
};

use crate::bridge::ShareBridge;

/// A chooser launch as the platform saw it.
#[derive(Debug, Clone)]
pub struct ChooserCall {
    pub intent: Intent,
    pub title: String,
    pub request_code: i32,
}

/// Platform double: a fixed set of installed packages and resolvable
/// schemes, and a log of everything launched.
#[derive(Default)]
pub struct MockPlatform {
    installed: HashSet<String>,
    schemes: HashSet<String>,
    surface: Option<(u32, u32)>,
    failing_probes: bool,
    started: Mutex<Vec<Intent>>,
    choosers: Mutex<Vec<ChooserCall>>,
    launched: Mutex<Vec<String>>,
    staged: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MockPlatform {
    pub fn installed(mut self, package: &str) -> Self {
        self.installed.insert(package.to_string());
        self
    }

    /// Make intents with `<scheme>:` data resolvable.
    pub fn resolving(mut self, scheme: &str) -> Self {
        self.schemes.insert(scheme.to_string());
        self
    }

    pub fn with_surface(mut self, width: u32, height: u32) -> Self {
        self.surface = Some((width, height));
        self
    }

    /// Every package and resolve probe errors.
    pub fn failing_probes(mut self) -> Self {
        self.failing_probes = true;
        self
    }

    pub fn started(&self) -> Vec<Intent> {
        self.started.lock().clone()
    }

    pub fn choosers(&self) -> Vec<ChooserCall> {
        self.choosers.lock().clone()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().clone()
    }

    pub fn staged(&self) -> Vec<(String, Vec<u8>)> {
        self.staged.lock().clone()
    }

    fn resolves(&self, intent: &Intent) -> bool {
        if let Some(package) = &intent.package {
            return self.installed.contains(package);
        }
        if intent.action == actions::VIEW {
            return true;
        }
        intent
            .data
            .as_deref()
            .and_then(|data| data.split(':').next())
            .is_some_and(|scheme| self.schemes.contains(scheme))
    }
}

impl PlatformBridge for MockPlatform {
    fn platform_name(&self) -> &str {
        "Mock"
    }
}

impl NativeIntents for MockPlatform {
    fn start_activity(&self, intent: &Intent) -> Result<()> {
        if !self.resolves(intent) {
            return Err(ShareError::NoHandler(intent.action.clone()));
        }
        self.started.lock().push(intent.clone());
        Ok(())
    }

    fn start_chooser(&self, intent: &Intent, title: &str, request_code: i32) -> Result<()> {
        self.choosers.lock().push(ChooserCall {
            intent: intent.clone(),
            title: title.to_string(),
            request_code,
        });
        Ok(())
    }

    fn launch_package(&self, package: &str) -> Result<bool> {
        if !self.installed.contains(package) {
            return Ok(false);
        }
        self.launched.lock().push(package.to_string());
        Ok(true)
    }

    fn send_broadcast(&self, _intent: &Intent) -> Result<()> {
        Ok(())
    }
}

impl NativePackages for MockPlatform {
    fn is_installed(&self, package: &str) -> Result<bool> {
        if self.failing_probes {
            return Err(ShareError::Platform("package manager unavailable".into()));
        }
        Ok(self.installed.contains(package))
    }

    fn can_resolve(&self, intent: &Intent) -> Result<bool> {
        if self.failing_probes {
            return Err(ShareError::Platform("package manager unavailable".into()));
        }
        Ok(self.resolves(intent))
    }
}

impl NativeSurface for MockPlatform {
    fn capture_surface(&self) -> Result<CapturedSurface> {
        let (width, height) = self
            .surface
            .ok_or_else(|| ShareError::Capture("no web view attached".into()))?;
        let rgba = vec![0x80; (width * height * 4) as usize];
        Ok(CapturedSurface::new(width, height, rgba))
    }
}

impl NativeShareCache for MockPlatform {
    fn stage_share_file(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        self.staged.lock().push((file_name.to_string(), bytes.to_vec()));
        Ok(format!("content://mock.fileprovider/share/{file_name}"))
    }
}

/// Gallery double that keeps saved images in memory.
#[derive(Default)]
pub struct MemoryGallery {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryGallery {
    pub fn writes(&self) -> usize {
        self.saved.lock().len()
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().clone()
    }
}

impl GalleryStore for MemoryGallery {
    fn persist_png(&self, png: &[u8], file_name: &str) -> Result<String> {
        self.saved.lock().push((file_name.to_string(), png.to_vec()));
        Ok(format!("memory://{file_name}"))
    }

    fn strategy(&self) -> &'static str {
        "memory"
    }
}

pub fn bridge_with(platform: MockPlatform) -> (ShareBridge, Arc<MockPlatform>, Arc<MemoryGallery>) {
    bridge_with_config(platform, BridgeConfig::default())
}

pub fn bridge_with_config(
    platform: MockPlatform,
    config: BridgeConfig,
) -> (ShareBridge, Arc<MockPlatform>, Arc<MemoryGallery>) {
    let platform = Arc::new(platform);
    let gallery = Arc::new(MemoryGallery::default());
    let bridge = ShareBridge::new(platform.clone(), gallery.clone(), config);
    (bridge, platform, gallery)
}

/// A small valid PNG, base64-encoded.
pub fn png_base64(width: u32, height: u32) -> String {
    let rgba = vec![0xff; (width * height * 4) as usize];
    sharebridge_media::ImageProcessor::from_surface(CapturedSurface::new(width, height, rgba))
        .and_then(sharebridge_media::ImageProcessor::into_base64_png)
        .unwrap()
}
