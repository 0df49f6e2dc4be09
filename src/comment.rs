// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

/// The last line of a block comment takes the closing delimiter after a
/// space when it stays under this width
const CLOSE_WITH_SPACE_WIDTH: usize = 78;
/// ... and without the space when it stays under this one
const CLOSE_TIGHT_WIDTH: usize = 79;

/// How a style writes new comments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Every line is prefixed with the delimiter
    Line(&'static str),
    /// The text is wrapped in an open and a close delimiter
    Block {
        open: &'static str,
        close: &'static str,
    },
}

/// Wrap text into a comment.
///
/// Without text (or with empty text), the bare delimiters are returned.
/// Otherwise the result ends with a newline and is ready to be put at the
/// top of a file.
pub fn comment(text: Option<&str>, marker: Marker) -> String {
    let text = text.filter(|x| !x.is_empty());
    match marker {
        Marker::Line(delimiter) => match text {
            None => format!("{delimiter} "),
            Some(text) => line_comment(text, delimiter),
        },
        Marker::Block { open, close } => match text {
            None => format!("{open} {close}"),
            Some(text) => block_comment(text, open, close),
        },
    }
}

fn line_comment(text: &str, delimiter: &str) -> String {
    let mut lines = text
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .peekable();
    if lines.peek().is_none() {
        return format!("{delimiter} ");
    }
    let mut buf = String::with_capacity(text.len() * 2);
    for line in lines {
        buf.push_str(delimiter);
        buf.push(' ');
        buf.push_str(line);
        buf.push('\n');
    }
    buf
}

fn block_comment(text: &str, open: &str, close: &str) -> String {
    let mut lines: Vec<String> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{open} {line}")
            } else {
                format!("   {line}")
            }
        })
        .collect();
    let Some(last) = lines.pop() else {
        return format!("{open} {close}");
    };

    let width = last.chars().count() + close.chars().count();
    if width < CLOSE_WITH_SPACE_WIDTH {
        lines.push(format!("{} {close}", last.trim_end()));
    } else if width < CLOSE_TIGHT_WIDTH {
        lines.push(format!("{}{close}", last.trim_end()));
    } else {
        lines.push(last);
        lines.push(close.to_string());
    }

    let mut buf = lines.join("\n");
    buf.push('\n');
    buf
}
