// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for ShareBridge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all ShareBridge operations.
#[derive(Debug, Error)]
pub enum ShareError {
    // -- Caller input --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("unsupported app: {0}")]
    UnsupportedTarget(String),

    // -- Target apps --
    #[error("{app} is not installed or could not be opened")]
    AppNotAvailable { app: String },

    /// No installed activity resolves the intent. `share_to_app` turns this
    /// into `AppNotAvailable` for the requested target.
    #[error("no application can handle {0}")]
    NoHandler(String),

    // -- Capture --
    #[error("screen capture failed: {0}")]
    Capture(String),

    // -- Share sheet --
    #[error("a share sheet is already waiting for a result (request code {0})")]
    ShareInProgress(i32),

    // -- Platform bridge --
    #[error("platform error: {0}")]
    Platform(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The caller-facing error kinds reported across the web boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInputError,
    DecodeError,
    UnsupportedTargetError,
    AppNotAvailableError,
    CaptureError,
    PlatformError,
}

impl ShareError {
    /// Fold this error into one of the six caller-facing kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShareError::InvalidInput(_) => ErrorKind::InvalidInputError,
            ShareError::Decode(_) => ErrorKind::DecodeError,
            ShareError::UnsupportedTarget(_) => ErrorKind::UnsupportedTargetError,
            ShareError::AppNotAvailable { .. } | ShareError::NoHandler(_) => {
                ErrorKind::AppNotAvailableError
            }
            ShareError::Capture(_) => ErrorKind::CaptureError,
            ShareError::ShareInProgress(_)
            | ShareError::Platform(_)
            | ShareError::PlatformUnavailable
            | ShareError::Io(_)
            | ShareError::Serialization(_) => ErrorKind::PlatformError,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidInputError => "InvalidInputError",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::UnsupportedTargetError => "UnsupportedTargetError",
            ErrorKind::AppNotAvailableError => "AppNotAvailableError",
            ErrorKind::CaptureError => "CaptureError",
            ErrorKind::PlatformError => "PlatformError",
        };
        f.write_str(name)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShareError>;
