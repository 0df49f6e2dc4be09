// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

/// A comment delimiter as seen by the uncommenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub token: &'static str,
    /// When true, the exact token is stripped once from the start of the
    /// line. Otherwise `token` is a set of characters and the longest run of
    /// them is stripped from both ends.
    pub literal: bool,
}

impl Delimiter {
    fn in_set(self, b: u8) -> bool {
        self.token.as_bytes().contains(&b)
    }

    fn leading_len(self, line: &[u8]) -> usize {
        if self.literal {
            if line.starts_with(self.token.as_bytes()) {
                self.token.len()
            } else {
                0
            }
        } else {
            line.iter().take_while(|b| self.in_set(**b)).count()
        }
    }

    fn trailing_len(self, line: &[u8]) -> usize {
        line.iter().rev().take_while(|b| self.in_set(**b)).count()
    }
}

/// One delimiter stripping pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UncommentRule {
    pub primary: Delimiter,
    /// Tried when the primary delimiter strips nothing
    pub synonym: Option<Delimiter>,
}

impl UncommentRule {
    /// Strips surrounding spaces and tabs
    pub const WHITESPACE: Self = Self::charset(" \t");

    pub const fn literal(token: &'static str) -> Self {
        Self {
            primary: Delimiter {
                token,
                literal: true,
            },
            synonym: None,
        }
    }

    pub const fn charset(token: &'static str) -> Self {
        Self {
            primary: Delimiter {
                token,
                literal: false,
            },
            synonym: None,
        }
    }

    pub const fn or_literal(mut self, token: &'static str) -> Self {
        self.synonym = Some(Delimiter {
            token,
            literal: true,
        });
        self
    }

    pub const fn or_charset(mut self, token: &'static str) -> Self {
        self.synonym = Some(Delimiter {
            token,
            literal: false,
        });
        self
    }

    /// Strip the delimiters from one line.
    ///
    /// The line is trimmed first. A literal delimiter only ever matches at
    /// the start of the line; a charset delimiter is stripped from both ends.
    pub fn strip<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let line = line.trim_ascii();
        let mut start = self.primary.leading_len(line);
        if start == 0 {
            if let Some(synonym) = self.synonym {
                start = synonym.leading_len(line);
            }
        }
        let rest = &line[start..];

        let mut end = 0;
        if !self.primary.literal {
            end = self.primary.trailing_len(rest);
        }
        if end == 0 {
            if let Some(synonym) = self.synonym.filter(|x| !x.literal) {
                end = synonym.trailing_len(rest);
            }
        }
        &rest[..rest.len() - end]
    }
}

/// Split a block into lines the way `str::lines` does, on raw bytes
pub fn split_lines(block: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = block
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect();
    if lines.last().is_some_and(|x| x.is_empty()) {
        lines.pop();
    }
    lines
}

/// Apply one stripping pass to every line.
///
/// The number of lines never changes, blank results are kept. With `trim`,
/// a second pass removes the spaces and tabs left behind by the delimiters.
pub fn uncomment_lines(lines: Vec<Vec<u8>>, rule: &UncommentRule, trim: bool) -> Vec<Vec<u8>> {
    lines
        .iter()
        .map(|line| {
            let stripped = rule.strip(line);
            if trim {
                UncommentRule::WHITESPACE.strip(stripped).to_vec()
            } else {
                stripped.to_vec()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_strips_runs_on_both_ends() {
        let rule = UncommentRule::charset("/*");
        assert_eq!(rule.strip(b"/* line one"), b" line one");
        assert_eq!(rule.strip(b"  line two */  "), b"line two ");
        assert_eq!(rule.strip(b"/**/"), b"");
        assert_eq!(rule.strip(b" * middle"), b" middle");
    }

    #[test]
    fn test_literal_strips_once_and_only_leading() {
        let rule = UncommentRule::literal("//");
        assert_eq!(rule.strip(b"/// doc //"), b"/ doc //");
        assert_eq!(rule.strip(b"code"), b"code");
    }

    #[test]
    fn test_synonym_used_when_primary_strips_nothing() {
        let rule = UncommentRule::literal("C").or_literal("!");
        assert_eq!(rule.strip(b"C one"), b" one");
        assert_eq!(rule.strip(b"! two"), b" two");
        // literal synonym is never stripped from the end
        assert_eq!(rule.strip(b"x !"), b"x !");

        let rule = UncommentRule::charset("-").or_charset("{-}");
        assert_eq!(rule.strip(b"{- one"), b" one");
        assert_eq!(rule.strip(b"two -}"), b"two ");
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(b"a\r\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(split_lines(b"a\n\n"), vec![b"a".to_vec(), Vec::new()]);
        assert_eq!(split_lines(b"a"), vec![b"a".to_vec()]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_uncomment_lines_keeps_line_count() {
        let input = split_lines(b"# one\n#\n#   two\n");
        let out = uncomment_lines(input, &UncommentRule::charset("#"), true);
        assert_eq!(out, vec![b"one".to_vec(), Vec::new(), b"two".to_vec()]);
    }

    #[test]
    fn test_uncomment_lines_without_trim() {
        let input = split_lines(b"# one\n#\ttwo");
        let out = uncomment_lines(input, &UncommentRule::charset("#"), false);
        assert_eq!(out, vec![b" one".to_vec(), b"\ttwo".to_vec()]);
    }

    #[test]
    fn test_non_utf8_bytes_are_kept() {
        let out = UncommentRule::charset("#").strip(b"# J\xf6rg");
        assert_eq!(out, b" J\xf6rg");
    }
}
