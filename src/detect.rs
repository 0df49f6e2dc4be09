// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::{Extraction, Style, extract_hashbang};

/// Which style recognized the boilerplate, and what it found
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Detection {
    /// `None` when no style found a comment block
    pub style: Option<Style>,
    pub extraction: Extraction,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.extraction.is_empty()
    }
}

fn rewind<R: Seek>(reader: &mut R) {
    if let Err(e) = reader.seek(SeekFrom::Start(0)) {
        cu::debug!("cannot rewind stream: {e}");
    }
}

/// Try every registered style in priority order, skipping the styles
/// whose extension filters exclude `path`. The first style that finds at
/// least one block wins.
///
/// The stream is left at the start of the body.
pub fn detect<R: Read + Seek>(path: &Path, reader: &mut R) -> Detection {
    for style in Style::ALL {
        if !style.matches_extension(path) {
            cu::trace!("'{}': skipping style {style}", path.display());
            continue;
        }
        rewind(reader);
        let extraction = style.extract(reader);
        if !extraction.is_empty() {
            cu::debug!(
                "'{}': detected {} block(s) in {style} style",
                path.display(),
                extraction.blocks.len()
            );
            return Detection {
                style: Some(style),
                extraction,
            };
        }
    }
    cu::debug!("'{}': no comment style matched", path.display());
    rewind(reader);
    Detection {
        style: None,
        extraction: extract_hashbang(reader),
    }
}

/// Use `style` if given, otherwise auto-detect
pub fn detect_or_use<R: Read + Seek>(
    style: Option<Style>,
    path: &Path,
    reader: &mut R,
) -> Detection {
    let Some(style) = style else {
        return detect(path, reader);
    };
    rewind(reader);
    let extraction = style.extract(reader);
    Detection {
        style: (!extraction.is_empty()).then_some(style),
        extraction,
    }
}
