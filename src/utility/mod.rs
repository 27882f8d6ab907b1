// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_output()      bytes --> UTF-8 (U+FFFD on invalid input)
//!   normalize_newlines() CRLF/CR --> LF
//! ```

pub mod encoding;
