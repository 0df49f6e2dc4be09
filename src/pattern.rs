// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use regex::bytes::Regex;

/// Compile a multi-line pattern for matching raw file bytes.
///
/// `^` and `$` anchor at line boundaries, and `.` matches any byte except
/// the newline, so files that are not valid UTF-8 can still be scanned.
pub fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?m-u){pattern}"))
}

/// Find the leftmost match of `pattern` in `text`.
///
/// Returns the matched bytes and the offset where the match starts.
/// Empty matches are reported too; callers decide whether they count.
pub fn find_first_match<'t>(text: &'t [u8], pattern: &Regex) -> Option<(&'t [u8], usize)> {
    pattern.find(text).map(|m| (m.as_bytes(), m.start()))
}

/// Length of the non-empty match of `pattern` that starts exactly at the
/// beginning of `text`, if any.
pub fn match_len_at_start(text: &[u8], pattern: &Regex) -> Option<usize> {
    match find_first_match(text, pattern) {
        Some((matched, 0)) if !matched.is_empty() => Some(matched.len()),
        _ => None,
    }
}
