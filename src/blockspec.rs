// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::collections::BTreeSet;

use cu::pre::*;

/// Highest block id that can be selected
pub const MAX_BLOCK_ID: usize = 1024;

/// A set of 1-based comment block ids, parsed from a list like `1,3-5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    ids: BTreeSet<usize>,
}

impl BlockSpec {
    pub fn parse(spec: &str) -> cu::Result<Self> {
        let mut ids = BTreeSet::new();
        for part in spec.split(',') {
            match part.split_once('-') {
                None => {
                    ids.insert(parse_id(part, spec)?);
                }
                Some((first, last)) => {
                    let first = parse_id(first, spec)?;
                    let last = parse_id(last, spec)?;
                    if first > last {
                        cu::bail!("malformed blockspec '{spec}': range {first}-{last} is reversed");
                    }
                    ids.extend(first..=last);
                }
            }
        }
        Ok(Self { ids })
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    /// The largest id in the set
    pub fn max(&self) -> usize {
        self.ids.last().copied().unwrap_or_default()
    }

    /// Error if the spec refers to a block past the `count` blocks found
    pub fn check(&self, count: usize) -> cu::Result<()> {
        let max = self.max();
        if max > count {
            cu::bail!("invalid block id {max}, only {count} block(s) found");
        }
        Ok(())
    }
}

fn parse_id(part: &str, spec: &str) -> cu::Result<usize> {
    let id = part.trim().parse::<usize>().ok();
    let id = cu::check!(id, "malformed blockspec '{spec}'")?;
    if id == 0 || id > MAX_BLOCK_ID {
        cu::bail!("malformed blockspec '{spec}': block ids go from 1 to {MAX_BLOCK_ID}");
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_and_ranges() {
        let spec = BlockSpec::parse("1,3-5,8").unwrap();
        for id in [1, 3, 4, 5, 8] {
            assert!(spec.contains(id));
        }
        for id in [0, 2, 6, 7, 9] {
            assert!(!spec.contains(id));
        }
        assert_eq!(spec.max(), 8);
    }

    #[test]
    fn test_parse_malformed() {
        for spec in ["", "0", "1,", "a", "2-1", "1-", "1025", "1;2", "1-2-3"] {
            assert!(BlockSpec::parse(spec).is_err(), "'{spec}' should be rejected");
        }
    }

    #[test]
    fn test_check() {
        let spec = BlockSpec::parse("2").unwrap();
        assert!(spec.check(2).is_ok());
        assert!(spec.check(1).is_err());
    }
}
