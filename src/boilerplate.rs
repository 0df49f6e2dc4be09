// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

//! Operations on the boilerplate at the top of file contents.
//!
//! These work on bytes already read into memory, so the same code serves
//! files, stdin and tests. Writing results back is done by the runner.

use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::{BlockSpec, Detection, Style, detect_or_use, extract_hashbang};

static COPYRIGHT_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)copyright.*(19[0-9][0-9]|20[0-9][0-9])")
        .expect("COPYRIGHT_NOTICE regex is invalid")
});

/// Check if the text looks like a copyright notice with a year
pub fn contains_copyright_notice(text: &[u8]) -> bool {
    COPYRIGHT_NOTICE.is_match(text)
}

/// Find the comment blocks at the top of `data`
pub fn find_blocks(data: &[u8], path: &Path, style: Option<Style>) -> Detection {
    detect_or_use(style, path, &mut Cursor::new(data))
}

/// Get the boilerplate to display: the selected blocks (all of them
/// without a spec), one after another, ending with a newline.
///
/// Returns `None` if there is no boilerplate.
pub fn show(
    data: &[u8],
    path: &Path,
    style: Option<Style>,
    spec: Option<&BlockSpec>,
) -> cu::Result<Option<Vec<u8>>> {
    let detection = find_blocks(data, path, style);
    if detection.is_empty() {
        return Ok(None);
    }
    let blocks = &detection.extraction.blocks;
    if let Some(spec) = spec {
        spec.check(blocks.len())?;
    }
    let selected: Vec<&[u8]> = blocks
        .iter()
        .enumerate()
        .filter(|(i, _)| spec.is_none_or(|spec| spec.contains(i + 1)))
        .map(|(_, block)| block.text.as_slice())
        .collect();
    let mut buf = selected.join(b"\n".as_slice());
    if !buf.ends_with(b"\n") {
        buf.push(b'\n');
    }
    Ok(Some(buf))
}

/// Count the comment blocks at the top of `data` and the lines they take
/// up. Both are 0 when there is no boilerplate.
pub fn count(data: &[u8], path: &Path, style: Option<Style>) -> (usize, usize) {
    let extraction = find_blocks(data, path, style).extraction;
    (extraction.blocks.len(), extraction.line_count())
}

/// Remove the selected blocks (all of them without a spec).
///
/// A removed block takes the blank run after it along. Everything else,
/// including the hashbang, is kept byte for byte.
///
/// Removing all blocks is refused when one of them has a copyright
/// notice, unless `force` is set. Returns `None` if there is no
/// boilerplate.
pub fn remove(
    data: &[u8],
    path: &Path,
    style: Option<Style>,
    spec: Option<&BlockSpec>,
    force: bool,
) -> cu::Result<Option<Vec<u8>>> {
    let detection = find_blocks(data, path, style);
    if detection.is_empty() {
        return Ok(None);
    }
    let extraction = &detection.extraction;
    match spec {
        Some(spec) => spec.check(extraction.blocks.len())?,
        None => {
            let has_copyright = extraction
                .blocks
                .iter()
                .any(|x| contains_copyright_notice(&x.text));
            if has_copyright && !force {
                cu::bail!("contains copyright notices, use --force to remove them.");
            }
        }
    }

    let mut buf = Vec::with_capacity(data.len());
    let mut copied = 0;
    for i in 0..extraction.blocks.len() {
        if spec.is_some_and(|spec| !spec.contains(i + 1)) {
            continue;
        }
        let span = extraction.removal_span(i);
        buf.extend_from_slice(&data[copied..span.start]);
        copied = span.end;
    }
    buf.extend_from_slice(&data[copied..]);
    Ok(Some(buf))
}

/// Replace the boilerplate by its uncommented text.
///
/// The output is the hashbang, each uncommented block followed by a
/// newline, then the body unchanged.
pub fn uncomment(data: &[u8], path: &Path, style: Option<Style>, trim: bool) -> Vec<u8> {
    let detection = find_blocks(data, path, style);
    let extraction = &detection.extraction;
    let mut buf = Vec::with_capacity(data.len());
    buf.extend_from_slice(&data[..extraction.start]);
    if let Some(style) = detection.style {
        for text in style.uncomment(&extraction.texts(), trim) {
            buf.extend_from_slice(&text);
            buf.push(b'\n');
        }
    }
    buf.extend_from_slice(&data[extraction.end..]);
    buf
}

/// Put `source` at the top of `data`, after the hashbang.
///
/// With `after`, the source goes after the existing boilerplate (and the
/// blank run that follows it) instead.
pub fn prepend(
    data: &[u8],
    path: &Path,
    source: &[u8],
    after: bool,
    style: Option<Style>,
) -> Vec<u8> {
    let extraction = if after {
        find_blocks(data, path, style).extraction
    } else {
        extract_hashbang(&mut Cursor::new(data))
    };
    let at = if after { extraction.end } else { extraction.start };

    let mut buf = Vec::with_capacity(data.len() + source.len() + 1);
    buf.extend_from_slice(&data[..at]);
    if !buf.is_empty() && !buf.ends_with(b"\n") {
        buf.push(b'\n');
    }
    buf.extend_from_slice(source);
    buf.extend_from_slice(&data[at..]);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> &Path {
        Path::new(name)
    }

    const THREE_BLOCKS: &str = "/* one */\n\n/* two */\n/* three\n */\n\nint x;\n";

    #[test]
    fn test_show_all_and_selected() {
        let out = show(THREE_BLOCKS.as_bytes(), path("a.c"), None, None)
            .unwrap()
            .unwrap();
        assert_eq!(out, b"/* one */\n/* two */\n/* three\n */\n");

        let spec = BlockSpec::parse("1,3").unwrap();
        let out = show(THREE_BLOCKS.as_bytes(), path("a.c"), None, Some(&spec))
            .unwrap()
            .unwrap();
        assert_eq!(out, b"/* one */\n/* three\n */\n");
    }

    #[test]
    fn test_show_invalid_block_id() {
        let spec = BlockSpec::parse("4").unwrap();
        assert!(show(THREE_BLOCKS.as_bytes(), path("a.c"), None, Some(&spec)).is_err());
    }

    #[test]
    fn test_show_nothing_found() {
        let out = show(b"int x;\n", path("a.c"), None, None).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_remove_middle_block() {
        let spec = BlockSpec::parse("2").unwrap();
        let out = remove(THREE_BLOCKS.as_bytes(), path("a.c"), None, Some(&spec), false)
            .unwrap()
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/* one */\n\n/* three\n */\n\nint x;\n"
        );
    }

    #[test]
    fn test_remove_first_block() {
        let spec = BlockSpec::parse("1").unwrap();
        let out = remove(THREE_BLOCKS.as_bytes(), path("a.c"), None, Some(&spec), false)
            .unwrap()
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/* two */\n/* three\n */\n\nint x;\n"
        );
    }

    #[test]
    fn test_remove_all_keeps_hashbang() {
        let input = "#!/bin/sh\n# a comment\n\necho hi\n";
        let out = remove(input.as_bytes(), path("a.sh"), None, None, false)
            .unwrap()
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "#!/bin/sh\necho hi\n");
    }

    #[test]
    fn test_remove_guards_copyright() {
        let input = "# Copyright (C) 2021 Alice\n\necho hi\n";
        assert!(remove(input.as_bytes(), path("a.sh"), None, None, false).is_err());
        let out = remove(input.as_bytes(), path("a.sh"), None, None, true)
            .unwrap()
            .unwrap();
        assert_eq!(out, b"echo hi\n");

        // an explicit selection is not guarded
        let spec = BlockSpec::parse("1").unwrap();
        assert!(
            remove(input.as_bytes(), path("a.sh"), None, Some(&spec), false)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_remove_nothing_found() {
        let out = remove(b"echo hi\n", path("a.sh"), None, None, false).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_copyright_notice() {
        assert!(contains_copyright_notice(b"Copyright (C) 1999 Bob"));
        assert!(contains_copyright_notice(b"COPYRIGHT 2013"));
        assert!(contains_copyright_notice(b"Copyright (C) 2004 J\xf6rg"));
        assert!(!contains_copyright_notice(b"Copyright holders"));
        assert!(!contains_copyright_notice(b"2013 copyright"));
    }

    #[test]
    fn test_uncomment_shell() {
        let input = "# Copyright 2020 Alice\n# licensed under MIT\n\nint main(){}\n";
        let out = uncomment(input.as_bytes(), path("x"), None, true);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Copyright 2020 Alice\nlicensed under MIT\nint main(){}\n"
        );
    }

    #[test]
    fn test_uncomment_c_block() {
        let input = "/* line one\n   line two */\nvoid f();\n";
        let out = uncomment(input.as_bytes(), path("x.c"), None, true);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "line one\nline two\nvoid f();\n"
        );
    }

    #[test]
    fn test_uncomment_without_boilerplate() {
        let input = "#!/usr/bin/env python\nimport os\n";
        let out = uncomment(input.as_bytes(), path("x.py"), None, true);
        assert_eq!(out, input.as_bytes());
    }

    #[test]
    fn test_prepend() {
        let input = "#!/bin/sh\n# old\n\necho hi\n";
        let out = prepend(input.as_bytes(), path("a.sh"), b"# new\n", false, None);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#!/bin/sh\n# new\n# old\n\necho hi\n"
        );

        let out = prepend(input.as_bytes(), path("a.sh"), b"# new\n", true, None);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#!/bin/sh\n# old\n\n# new\necho hi\n"
        );
    }

    #[test]
    fn test_prepend_hashbang_without_newline() {
        let out = prepend(b"#!/bin/sh", path("a.sh"), b"# new\n", false, None);
        assert_eq!(out, b"#!/bin/sh\n# new\n");
    }

    #[test]
    fn test_non_utf8_boilerplate_is_kept() {
        let input = b"# J\xf6rg\n\necho\n";
        let out = show(input, path("a.sh"), None, None).unwrap().unwrap();
        assert_eq!(out, b"# J\xf6rg\n");

        let out = uncomment(input, path("a.sh"), None, true);
        assert_eq!(out, b"J\xf6rg\necho\n");
    }

    #[test]
    fn test_count() {
        assert_eq!(count(THREE_BLOCKS.as_bytes(), path("a.c"), None), (3, 2));
        assert_eq!(count(b"/* a */\n# b", path("a.c"), None), (1, 1));
        assert_eq!(count(b"# a\n# b\n\necho\n", path("a.sh"), None), (1, 2));
        assert_eq!(count(b"echo\n", path("a.sh"), None), (0, 0));
    }
}
