// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use regex::bytes::Regex;

use crate::pattern;

/// One comment block found at the top of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The raw block, delimiters included
    pub text: Vec<u8>,
    /// Byte range of the block in the stream
    pub span: Range<usize>,
}

/// Result of scanning the top of a stream for comment blocks.
///
/// All offsets are absolute stream positions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The `#!` line, including its line ending
    pub hashbang: Option<Vec<u8>>,
    /// Blocks in file order. Block ids shown to users start at 1.
    pub blocks: Vec<Block>,
    /// Where scanning started, right after the hashbang if there is one
    pub start: usize,
    /// Where the body starts. Equal to `start` when no block is found,
    /// otherwise just past the whitespace that follows the last block.
    pub end: usize,
}

impl Extraction {
    fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The raw text of every block
    pub fn texts(&self) -> Vec<Vec<u8>> {
        self.blocks.iter().map(|x| x.text.clone()).collect()
    }

    /// Number of lines the blocks take up, not counting the separators.
    ///
    /// This is the number of newlines in the blocks, plus one when the last
    /// block does not end with a newline.
    pub fn line_count(&self) -> usize {
        let Some(last) = self.blocks.last() else {
            return 0;
        };
        let newlines = self
            .blocks
            .iter()
            .map(|x| x.text.iter().filter(|b| **b == b'\n').count())
            .sum::<usize>();
        if last.text.ends_with(b"\n") {
            newlines
        } else {
            newlines + 1
        }
    }

    /// Byte range a block takes up together with the separator that
    /// follows it, up to the next block or the body.
    ///
    /// The first block also owns the blank run in front of it.
    pub fn removal_span(&self, index: usize) -> Range<usize> {
        let start = if index == 0 {
            self.start
        } else {
            self.blocks[index].span.start
        };
        let end = self
            .blocks
            .get(index + 1)
            .map(|x| x.span.start)
            .unwrap_or(self.end);
        start..end
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn blank_len(data: &[u8]) -> usize {
    data.iter().take_while(|b| is_blank(**b)).count()
}

/// Length of the `#!` line at the start of `data`, if there is one
pub fn hashbang_len(data: &[u8]) -> Option<usize> {
    if !data.starts_with(b"#!") {
        return None;
    }
    let len = match data.iter().position(|b| *b == b'\n') {
        Some(newline) => newline + 1,
        None => data.len(),
    };
    Some(len)
}

/// Scan in-memory data for comment blocks.
///
/// Blank runs before and between blocks separate blocks and are not part
/// of them. Scanning stops at the first place where the pattern does not
/// match a non-empty chunk.
pub fn scan_blocks(data: &[u8], pattern: &Regex, capture_hashbang: bool) -> Extraction {
    let mut extraction = Extraction::default();
    let mut offset = 0;
    if capture_hashbang {
        if let Some(len) = hashbang_len(data) {
            extraction.hashbang = Some(data[..len].to_vec());
            offset = len;
        }
    }
    extraction.start = offset;
    extraction.end = offset;

    offset += blank_len(&data[offset..]);
    while let Some(len) = pattern::match_len_at_start(&data[offset..], pattern) {
        let span = offset..offset + len;
        extraction.blocks.push(Block {
            text: data[span.clone()].to_vec(),
            span,
        });
        offset += len;
        offset += blank_len(&data[offset..]);
        extraction.end = offset;
    }
    extraction
}

/// Extract the comment blocks at the current position of the stream.
///
/// On return, the stream is positioned at [`Extraction::end`], so the body
/// can be read from there. A stream that cannot be read gives no blocks.
pub fn extract_blocks<R: Read + Seek>(
    reader: &mut R,
    pattern: &Regex,
    capture_hashbang: bool,
) -> Extraction {
    read_and_scan(reader, capture_hashbang, |data, capture| {
        scan_blocks(data, pattern, capture)
    })
}

/// Like [`extract_blocks`], but only the hashbang is looked for
pub fn extract_hashbang<R: Read + Seek>(reader: &mut R) -> Extraction {
    read_and_scan(reader, true, |data, _| {
        let len = hashbang_len(data).unwrap_or_default();
        Extraction {
            hashbang: (len > 0).then(|| data[..len].to_vec()),
            blocks: Vec::new(),
            start: len,
            end: len,
        }
    })
}

fn read_and_scan<R, F>(reader: &mut R, capture_hashbang: bool, scan: F) -> Extraction
where
    R: Read + Seek,
    F: FnOnce(&[u8], bool) -> Extraction,
{
    let base = match reader.stream_position() {
        Ok(x) => x as usize,
        Err(e) => {
            cu::debug!("cannot get stream position: {e}");
            return Extraction::default();
        }
    };
    let mut data = Vec::new();
    if let Err(e) = reader.read_to_end(&mut data) {
        cu::debug!("cannot read stream: {e}");
        if let Err(e) = reader.seek(SeekFrom::Start(base as u64)) {
            cu::debug!("cannot rewind stream: {e}");
        }
        return Extraction::empty_at(base);
    }

    let mut extraction = scan(&data, capture_hashbang);
    extraction.start += base;
    extraction.end += base;
    for block in &mut extraction.blocks {
        block.span = block.span.start + base..block.span.end + base;
    }
    if let Err(e) = reader.seek(SeekFrom::Start(extraction.end as u64)) {
        cu::debug!("cannot reposition stream: {e}");
    }
    extraction
}
