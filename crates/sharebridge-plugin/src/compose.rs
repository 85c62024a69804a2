// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message bodies, deep links, and cache file names.

use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use uuid::Uuid;

/// Characters Android's `Uri.encode` leaves untouched besides alphanumerics.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'!')
    .remove(b'.')
    .remove(b'~')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Join text and URL with `separator`, leaving out missing parts.
pub fn join_body(text: Option<&str>, url: Option<&str>, separator: &str) -> String {
    match (text, url) {
        (Some(text), Some(url)) => format!("{text}{separator}{url}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

/// Strip everything but ASCII digits from a phone number.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode `value` the way `android.net.Uri.encode` does.
pub fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE_SET).to_string()
}

/// `https://wa.me/<digits>?text=<body>`.
pub fn whatsapp_link(digits: &str, body: &str) -> String {
    format!("https://wa.me/{digits}?text={}", uri_encode(body))
}

/// `<prefix>_<millis>_<id>.png`. The id keeps names unique within one
/// millisecond.
fn stamped_png_name(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}_{}.png", Utc::now().timestamp_millis(), &id[..8])
}

/// Name for a staged share file: `share_<millis>_<id>.png`.
pub fn share_file_name() -> String {
    stamped_png_name("share")
}

/// Name for a gallery image: `<prefix>_<millis>_<id>.png`.
pub fn gallery_file_name(prefix: &str) -> String {
    stamped_png_name(prefix)
}
