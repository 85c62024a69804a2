// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decode caller payloads, wrap captured surface pixels,
// and encode PNG. Operates on in-memory images using the `image` crate.

use image::{DynamicImage, ImageFormat, RgbaImage};
use sharebridge_core::error::{Result, ShareError};
use sharebridge_core::types::CapturedSurface;
use tracing::{debug, instrument};

use crate::payload::{decode_base64, encode_base64};

/// A single decoded, in-memory image.
///
/// The pixel buffer is owned; it is released when the processor is dropped
/// or consumed by one of the `into_*` encoders.
///
/// ```ignore
/// let png = ImageProcessor::from_surface(capture)?.to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (PNG, JPEG, WebP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| ShareError::Decode(format!("not a valid image: {err}")))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Decode a base64 payload from the web layer and validate it as an image.
    pub fn from_base64(payload: &str) -> Result<Self> {
        let bytes = decode_base64(payload)?;
        Self::from_bytes(&bytes)
    }

    /// Take ownership of pixels read back from the on-screen surface.
    ///
    /// Fails with `ShareError::Capture` if the surface has a zero dimension or
    /// the buffer length does not match `width * height * 4`.
    #[instrument(skip_all, fields(width = surface.width, height = surface.height))]
    pub fn from_surface(surface: CapturedSurface) -> Result<Self> {
        if surface.is_empty() {
            return Err(ShareError::Capture(format!(
                "surface has no size ({}x{})",
                surface.width, surface.height
            )));
        }
        let CapturedSurface {
            width,
            height,
            rgba,
        } = surface;
        let buffer = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            ShareError::Capture(format!(
                "pixel buffer does not match a {width}x{height} RGBA surface"
            ))
        })?;
        Ok(Self {
            image: DynamicImage::ImageRgba8(buffer),
        })
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the image as lossless PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode as PNG and release the pixel buffer.
    pub fn into_png_bytes(self) -> Result<Vec<u8>> {
        self.to_png_bytes()
    }

    /// Encode as PNG, then base64, releasing the pixel buffer.
    pub fn into_base64_png(self) -> Result<String> {
        let png = self.into_png_bytes()?;
        Ok(encode_base64(&png))
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| ShareError::Platform(format!("image encoding failed: {err}")))?;
    debug!(bytes = buffer.len(), ?format, "Image encoded");
    Ok(buffer)
}
