// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What to do when a share sheet is launched while another is still
/// waiting for its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingPolicy {
    /// Every launch gets its own request code and resolves independently.
    #[default]
    AllowConcurrent,
    /// Refuse a new share sheet until the outstanding one reports back.
    RejectWhileAwaiting,
}

/// Settings supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Chooser title used by `share` when the request has none.
    pub chooser_title: String,
    /// Chooser title used by `shareScreenshot`.
    pub screenshot_chooser_title: String,
    /// Sub-album under the device Pictures collection.
    pub gallery_album: String,
    /// Gallery file names are `<prefix>_<millis>.png`.
    pub gallery_file_prefix: String,
    /// Directory inside the app cache holding temporary share files. Must
    /// match the `<cache-path>` entry of the host's FileProvider paths XML.
    pub share_cache_dir: String,
    /// Appended to the application id to form the FileProvider authority.
    pub file_provider_suffix: String,
    pub pending_policy: PendingPolicy,
    /// View id of the web view to capture for screenshots. Without it the
    /// whole `android.R.id.content` container is drawn, which includes any
    /// native views the host placed next to the web view.
    pub capture_view_id: Option<i32>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            chooser_title: "Share".into(),
            screenshot_chooser_title: "Share screenshot".into(),
            gallery_album: "ShareBridge".into(),
            gallery_file_prefix: "ShareBridge".into(),
            share_cache_dir: "sharebridge_share".into(),
            file_provider_suffix: ".sharebridge.fileprovider".into(),
            pending_policy: PendingPolicy::AllowConcurrent,
            capture_view_id: None,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON configuration object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// FileProvider authority for the given application id.
    pub fn file_provider_authority(&self, package_name: &str) -> String {
        format!("{package_name}{}", self.file_provider_suffix)
    }
}
