// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Base64 payloads as sent by the web layer.
//
// Decoding is lenient in the same places Android's `Base64.DEFAULT` is:
// line breaks and other ASCII whitespace are skipped and padding is
// optional. A `data:<mime>;base64,` prefix, as produced by
// `canvas.toDataURL()`, is stripped as well. Encoding is always the
// standard alphabet with padding and no line wrapping.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use sharebridge_core::error::{Result, ShareError};
use tracing::debug;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Strip a `data:...;base64,` prefix if present.
fn strip_data_url(input: &str) -> &str {
    if !input.starts_with("data:") {
        return input;
    }
    match input.find("base64,") {
        Some(idx) => &input[idx + "base64,".len()..],
        None => input,
    }
}

/// Decode a base64 payload into raw bytes.
///
/// Fails with `ShareError::Decode` if the payload is empty once the prefix
/// and whitespace are removed, or if it is not valid base64.
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let compact: String = strip_data_url(input.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if compact.is_empty() {
        return Err(ShareError::Decode("empty base64 payload".into()));
    }

    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(|e| ShareError::Decode(format!("invalid base64: {e}")))?;
    debug!(encoded_len = compact.len(), decoded_len = bytes.len(), "base64 payload decoded");
    Ok(bytes)
}

/// Encode bytes as single-line, padded standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_payload() {
        assert_eq!(decode_base64("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn tolerates_line_breaks_and_missing_padding() {
        assert_eq!(decode_base64("aGVs\nbG8").unwrap(), b"hello");
        assert_eq!(decode_base64("  aGVsbG8=\r\n").unwrap(), b"hello");
    }

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(
            decode_base64("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = decode_base64("not base64 at all!").unwrap_err();
        assert!(matches!(err, ShareError::Decode(_)));
    }

    #[test]
    fn rejects_empty_after_prefix() {
        let err = decode_base64("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, ShareError::Decode(_)));
    }

    #[test]
    fn encodes_without_wrapping() {
        let encoded = encode_base64(&[0u8; 200]);
        assert!(!encoded.contains('\n'));
        assert!(encoded.ends_with('='));
    }
}
