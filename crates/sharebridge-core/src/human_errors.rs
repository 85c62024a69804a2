// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-facing error payloads.
//
// The web layer shows these to end users, so every error carries a plain
// English message and a suggestion next to its machine-readable kind.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ShareError};

/// Error body returned across the web boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    /// Plain English summary.
    pub message: String,
    /// What the user can try next.
    pub suggestion: String,
}

/// Convert a `ShareError` into a payload the web layer can display as-is.
pub fn humanize_error(err: &ShareError) -> ErrorPayload {
    let (message, suggestion): (String, String) = match err {
        ShareError::InvalidInput(detail) => (
            format!("Nothing to save or share ({detail})."),
            "Pick an image or enter some text, then try again.".into(),
        ),

        ShareError::Decode(_) => (
            "This image couldn't be read.".into(),
            "The image may be damaged or in an unusual format. Try a PNG or JPEG.".into(),
        ),

        ShareError::UnsupportedTarget(app) => (
            format!("Sharing to \"{app}\" isn't supported."),
            "Use the regular share button to pick an app instead.".into(),
        ),

        ShareError::AppNotAvailable { app } => (
            format!("{app} isn't installed on this device."),
            format!("Install {app}, or use the regular share button to pick another app."),
        ),

        ShareError::NoHandler(_) => (
            "No app on this device can open this.".into(),
            "Install a suitable app, or use the regular share button.".into(),
        ),

        ShareError::Capture(_) => (
            "The screen couldn't be captured.".into(),
            "Wait for the page to finish loading, then try again.".into(),
        ),

        ShareError::ShareInProgress(_) => (
            "A share window is already open.".into(),
            "Finish or close the open share window first.".into(),
        ),

        ShareError::Platform(detail) => (
            "Something went wrong while sharing.".into(),
            format!("Please try again. ({detail})"),
        ),

        ShareError::PlatformUnavailable => (
            "Sharing isn't available on this device.".into(),
            "This feature needs an Android device.".into(),
        ),

        ShareError::Io(e) => (
            "The image couldn't be stored.".into(),
            format!("Check that the device has free storage, then try again. ({e})"),
        ),

        ShareError::Serialization(_) => (
            "The request couldn't be understood.".into(),
            "Update the app and try again.".into(),
        ),
    };

    ErrorPayload {
        kind: err.kind(),
        message,
        suggestion,
    }
}

impl From<&ShareError> for ErrorPayload {
    fn from(err: &ShareError) -> Self {
        humanize_error(err)
    }
}
