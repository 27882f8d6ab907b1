// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process output decoding.
//!
//! ```text
//! raw bytes --(UTF-8, BOM stripped, invalid --> U+FFFD)--> text
//!           --(CRLF --> LF, CR progress overwrite collapsed)--> normalized
//! ```
//!
//! Uses `encoding_rs`. Decoding never fails.

use encoding_rs::UTF_8;
use std::borrow::Cow;

/// Decodes bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// A leading byte-order mark is removed.
///
/// # Example
/// ```
/// use gitdeck::utility::encoding::decode_lossy;
///
/// assert_eq!(decode_lossy(b"caf\xc3\xa9"), "café");
/// assert_eq!(decode_lossy(b"bad\xff"), "bad\u{FFFD}");
/// ```
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _had_errors) = UTF_8.decode_with_bom_removal(bytes);
    text
}

/// Normalizes line endings the way a terminal would display them.
///
/// `\r\n` becomes `\n`. Within a line, text overwritten by a bare `\r`
/// (progress meters) is dropped so only the final rendering remains.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut normalized = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            normalized.push('\n');
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        let visible = line.rsplit('\r').next().unwrap_or(line);
        normalized.push_str(visible);
    }
    normalized
}

/// Decodes captured process output into normalized UTF-8 text.
#[must_use]
pub fn decode_output(bytes: &[u8]) -> String {
    normalize_newlines(&decode_lossy(bytes))
}
