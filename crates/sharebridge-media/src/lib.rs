// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sharebridge-media: Image payload handling for ShareBridge.
//
// Decodes the base64 payloads the web layer sends, validates that they are
// images, and PNG-encodes captured surfaces.

pub mod image;
pub mod payload;

// Re-export the primary items so callers can use `sharebridge_media::ImageProcessor` etc.
pub use crate::image::processor::ImageProcessor;
pub use payload::{decode_base64, encode_base64};
