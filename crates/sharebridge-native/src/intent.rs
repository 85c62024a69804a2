// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-neutral description of an Android `Intent`.
//
// Intents are built as plain values and only turned into JNI objects by the
// Android bridge, so everything that decides *what* gets launched can be
// tested off-device.

/// `Intent` action strings.
pub mod actions {
    pub const SEND: &str = "android.intent.action.SEND";
    pub const SEND_TO: &str = "android.intent.action.SENDTO";
    pub const VIEW: &str = "android.intent.action.VIEW";
    pub const MEDIA_SCANNER_SCAN_FILE: &str = "android.intent.action.MEDIA_SCANNER_SCAN_FILE";
    pub const INSTAGRAM_ADD_TO_STORY: &str = "com.instagram.share.ADD_TO_STORY";
}

/// `Intent` extra keys.
pub mod extras {
    pub const TEXT: &str = "android.intent.extra.TEXT";
    pub const STREAM: &str = "android.intent.extra.STREAM";
    /// Read by the stock SMS apps; not an `Intent` constant.
    pub const SMS_BODY: &str = "sms_body";
}

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_ANY_IMAGE: &str = "image/*";

/// One `putExtra` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentExtra {
    /// `putExtra(String, String)`.
    Text { key: String, value: String },
    /// `putExtra(String, Parcelable)` with a parsed `Uri`.
    Uri { key: String, uri: String },
}

/// An intent to launch, broadcast, or resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: String,
    /// Restricts delivery to one application (`setPackage`).
    pub package: Option<String>,
    /// Data URI (`mailto:`, `sms:+1555`, `https://wa.me/...`, `content://...`).
    pub data: Option<String>,
    pub mime_type: Option<String>,
    pub extras: Vec<IntentExtra>,
    /// Adds `FLAG_GRANT_READ_URI_PERMISSION`.
    pub grant_read_uri: bool,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            package: None,
            data: None,
            mime_type: None,
            extras: Vec::new(),
            grant_read_uri: false,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_data(mut self, uri: impl Into<String>) -> Self {
        self.data = Some(uri.into());
        self
    }

    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.push(IntentExtra::Text {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Attach a content URI as `EXTRA_STREAM` and grant read access to it.
    pub fn with_stream(mut self, uri: impl Into<String>) -> Self {
        self.extras.push(IntentExtra::Uri {
            key: extras::STREAM.into(),
            uri: uri.into(),
        });
        self.grant_read_uri = true;
        self
    }

    pub fn granting_read(mut self) -> Self {
        self.grant_read_uri = true;
        self
    }

    /// Value of a string extra, if set.
    pub fn text_extra(&self, key: &str) -> Option<&str> {
        self.extras.iter().find_map(|extra| match extra {
            IntentExtra::Text { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Value of a URI extra, if set.
    pub fn uri_extra(&self, key: &str) -> Option<&str> {
        self.extras.iter().find_map(|extra| match extra {
            IntentExtra::Uri { key: k, uri } if k == key => Some(uri.as_str()),
            _ => None,
        })
    }
}
