// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request and response types exchanged with the web layer.
//
// Field names are camelCase on the wire because the callers are JavaScript.
// Optional strings treat "" the same as a missing value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShareError;

/// Return the string only if it is present and non-empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Target apps
// ---------------------------------------------------------------------------

/// The closed set of apps `shareToApp` knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetApp {
    Whatsapp,
    Telegram,
    Instagram,
    Facebook,
    Twitter,
    Email,
    Sms,
}

impl TargetApp {
    /// Every supported target, in the order the web layer lists them.
    pub const ALL: [TargetApp; 7] = [
        TargetApp::Whatsapp,
        TargetApp::Telegram,
        TargetApp::Instagram,
        TargetApp::Facebook,
        TargetApp::Twitter,
        TargetApp::Email,
        TargetApp::Sms,
    ];

    /// Wire identifier (`"whatsapp"`, `"sms"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            TargetApp::Whatsapp => "whatsapp",
            TargetApp::Telegram => "telegram",
            TargetApp::Instagram => "instagram",
            TargetApp::Facebook => "facebook",
            TargetApp::Twitter => "twitter",
            TargetApp::Email => "email",
            TargetApp::Sms => "sms",
        }
    }

    /// Android package name for targets that are a single installable app.
    ///
    /// Email and SMS are served by whichever handler resolves the scheme, so
    /// they have no fixed package.
    pub fn package_name(self) -> Option<&'static str> {
        match self {
            TargetApp::Whatsapp => Some("com.whatsapp"),
            TargetApp::Telegram => Some("org.telegram.messenger"),
            TargetApp::Instagram => Some("com.instagram.android"),
            TargetApp::Facebook => Some("com.facebook.katana"),
            TargetApp::Twitter => Some("com.twitter.android"),
            TargetApp::Email | TargetApp::Sms => None,
        }
    }
}

impl FromStr for TargetApp {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetApp::ALL
            .into_iter()
            .find(|app| app.as_str() == s)
            .ok_or_else(|| ShareError::UnsupportedTarget(s.to_string()))
    }
}

impl std::fmt::Display for TargetApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Options for the generic share sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    /// Base64-encoded image bytes.
    pub image: Option<String>,
    /// Chooser title; the configured default is used when absent.
    pub title: Option<String>,
}

impl ShareRequest {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }
}

/// Options for sharing straight into one app.
///
/// `app` stays a string until dispatch so that an unknown identifier can be
/// reported by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareToAppRequest {
    pub app: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub phone_number: Option<String>,
}

impl ShareToAppRequest {
    /// Resolve the requested target, failing with `UnsupportedTarget`.
    pub fn target(&self) -> Result<TargetApp, ShareError> {
        self.app.parse()
    }

    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn phone_number(&self) -> Option<&str> {
        non_empty(&self.phone_number)
    }
}

fn default_true() -> bool {
    true
}

/// Options for `shareScreenshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotOptions {
    /// Open the share sheet with the capture instead of returning it.
    #[serde(default)]
    pub share: bool,
    /// Include the PNG inline as base64 (ignored when `share` is set).
    #[serde(default = "default_true")]
    pub return_base64: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self {
            share: false,
            return_base64: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Outcome of a share sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    /// True when the user picked a target, false when the sheet was dismissed.
    pub completed: bool,
}

/// What `shareToApp` handed to the OS. None of these report whether the
/// user actually finished sharing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// A share/send-to intent was delivered to the target app.
    ShareIntent,
    /// A deep link was opened (WhatsApp `wa.me` with a phone number).
    DirectLink,
    /// The image was handed to the app's "add to story" flow.
    Story,
    /// The app was only brought to the foreground.
    AppLaunched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToAppResponse {
    /// The intent was handed to the OS.
    pub completed: bool,
    pub app: TargetApp,
    pub delivery: Delivery,
}

/// Which share targets are usable on this device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAvailability {
    pub whatsapp: bool,
    pub telegram: bool,
    pub instagram: bool,
    pub facebook: bool,
    pub twitter: bool,
    pub email: bool,
    pub sms: bool,
}

impl AppAvailability {
    pub fn get(&self, app: TargetApp) -> bool {
        match app {
            TargetApp::Whatsapp => self.whatsapp,
            TargetApp::Telegram => self.telegram,
            TargetApp::Instagram => self.instagram,
            TargetApp::Facebook => self.facebook,
            TargetApp::Twitter => self.twitter,
            TargetApp::Email => self.email,
            TargetApp::Sms => self.sms,
        }
    }

    pub fn set(&mut self, app: TargetApp, available: bool) {
        let slot = match app {
            TargetApp::Whatsapp => &mut self.whatsapp,
            TargetApp::Telegram => &mut self.telegram,
            TargetApp::Instagram => &mut self.instagram,
            TargetApp::Facebook => &mut self.facebook,
            TargetApp::Twitter => &mut self.twitter,
            TargetApp::Email => &mut self.email,
            TargetApp::Sms => &mut self.sms,
        };
        *slot = available;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

/// Result of persisting an image to the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryResult {
    pub saved: bool,
    /// MediaStore content URI, or an absolute filesystem path on the legacy
    /// and desktop stores.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

/// Pixels read back from the on-screen surface, RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSurface {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl CapturedSurface {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// A surface that has not been laid out yet reports zero width or height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_names_the_identifier() {
        let err = "myspace".parse::<TargetApp>().unwrap_err();
        assert!(matches!(err, ShareError::UnsupportedTarget(ref id) if id == "myspace"));
    }

    #[test]
    fn target_identifiers_are_case_sensitive() {
        assert!("WhatsApp".parse::<TargetApp>().is_err());
        assert_eq!("whatsapp".parse::<TargetApp>().unwrap(), TargetApp::Whatsapp);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let req = ShareRequest {
            text: Some(String::new()),
            url: Some("https://example.org".into()),
            ..Default::default()
        };
        assert_eq!(req.text(), None);
        assert_eq!(req.url(), Some("https://example.org"));
    }

    #[test]
    fn screenshot_options_default_to_inline_base64() {
        let opts: ScreenshotOptions = serde_json::from_str("{}").unwrap();
        assert!(!opts.share);
        assert!(opts.return_base64);

        let opts: ScreenshotOptions =
            serde_json::from_str(r#"{"share":true,"returnBase64":false}"#).unwrap();
        assert!(opts.share);
        assert!(!opts.return_base64);
    }

    #[test]
    fn share_to_app_request_reads_camel_case() {
        let req: ShareToAppRequest =
            serde_json::from_str(r#"{"app":"sms","phoneNumber":"555"}"#).unwrap();
        assert_eq!(req.target().unwrap(), TargetApp::Sms);
        assert_eq!(req.phone_number(), Some("555"));
    }

    #[test]
    fn availability_serializes_every_app() {
        let json = serde_json::to_value(AppAvailability::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), TargetApp::ALL.len());
        for app in TargetApp::ALL {
            assert_eq!(obj.get(app.as_str()), Some(&serde_json::Value::Bool(false)));
        }
    }

    #[test]
    fn screenshot_response_omits_missing_base64() {
        let json = serde_json::to_string(&ScreenshotResponse {
            completed: true,
            base64: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }
}
