//! Contiguous address spans and their conversion to CIDR blocks.

use super::prefix::{bits_to_addr, Family, Prefix};
use std::error::Error;
use std::fmt;

/// Inclusive span `[start, end]` of addresses in one family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddrRange {
    pub family: Family,
    pub start: u128,
    pub end: u128,
}

impl AddrRange {
    pub fn new(family: Family, start: u128, end: u128) -> Result<AddrRange, Box<dyn Error>> {
        if start > end || end > family.all_bits() {
            return Err(format!("Invalid {family} range {start:#x}-{end:#x}").into());
        }
        Ok(AddrRange { family, start, end })
    }

    pub fn overlaps(&self, other: &AddrRange) -> bool {
        self.family == other.family && self.start <= other.end && other.start <= self.end
    }

    /// Pieces of `self` left after removing `other`: the part below and the
    /// part above. Either may be empty.
    pub fn subtract(&self, other: &AddrRange) -> (Option<AddrRange>, Option<AddrRange>) {
        if !self.overlaps(other) {
            return (Some(*self), None);
        }
        let below = (self.start < other.start).then(|| AddrRange {
            family: self.family,
            start: self.start,
            end: other.start - 1,
        });
        let above = (self.end > other.end).then(|| AddrRange {
            family: self.family,
            start: other.end + 1,
            end: self.end,
        });
        (below, above)
    }

    /// Minimal list of canonical prefixes covering exactly this span.
    ///
    /// Greedy: at each position take the largest aligned block that still
    /// fits, then move past it.
    pub fn prefixes(&self) -> Vec<Prefix> {
        let width = self.family.max_length() as u32;
        let mut out = Vec::new();
        let mut cur = self.start;

        loop {
            let align = if cur == 0 {
                width
            } else {
                cur.trailing_zeros().min(width)
            };
            let remaining = self.end - cur;
            // floor(log2(remaining + 1)) without overflowing on the full v6 span
            let fit = if remaining == u128::MAX {
                128
            } else {
                127 - (remaining + 1).leading_zeros()
            };
            let block = align.min(fit);
            out.push(Prefix {
                addr: bits_to_addr(self.family, cur),
                mask: (width - block) as u8,
            });

            let last = if block == 128 {
                u128::MAX
            } else {
                cur + ((1u128 << block) - 1)
            };
            if last >= self.end {
                break;
            }
            cur = last + 1;
        }

        out
    }
}

impl From<Prefix> for AddrRange {
    fn from(prefix: Prefix) -> Self {
        AddrRange {
            family: prefix.family(),
            start: prefix.lo(),
            end: prefix.hi(),
        }
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            bits_to_addr(self.family, self.start),
            bits_to_addr(self.family, self.end)
        )
    }
}
