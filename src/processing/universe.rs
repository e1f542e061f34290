//! Single-family address universe.
//!
//! Holds the addresses not yet excluded as disjoint inclusive spans keyed by
//! their start. Removals punch holes by splitting spans; [`AddressUniverse::snapshot`]
//! re-expresses every span as its minimal CIDR cover.

use crate::models::{addr_to_bits, AddrRange, Family, Prefix};
use std::collections::BTreeMap;
use std::error::Error;
use std::net::IpAddr;

/// Addresses of one family that are still allowed.
///
/// Spans never overlap and never touch, since they only ever shrink or split
/// from a single seed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressUniverse {
    family: Family,
    /// start -> end, inclusive
    ranges: BTreeMap<u128, u128>,
}

impl AddressUniverse {
    /// Create a universe covering exactly the seed prefix.
    ///
    /// A seed that does not parse is a configuration error.
    pub fn new(seed: &str) -> Result<AddressUniverse, Box<dyn Error>> {
        let seed = Prefix::new(seed).map_err(|e| format!("Invalid seed range {seed:?}: {e}"))?;
        let mut ranges = BTreeMap::new();
        ranges.insert(seed.lo(), seed.hi());
        Ok(AddressUniverse {
            family: seed.family(),
            ranges,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Stored spans in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = AddrRange> + '_ {
        self.ranges.iter().map(|(&start, &end)| AddrRange {
            family: self.family,
            start,
            end,
        })
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        if Family::of(&addr) != self.family {
            return false;
        }
        let bits = addr_to_bits(addr);
        self.ranges
            .range(..=bits)
            .next_back()
            .is_some_and(|(_, &end)| bits <= end)
    }

    /// Remove every address covered by `prefix`.
    ///
    /// Returns whether anything was removed. A prefix of the other family
    /// is an error.
    pub fn remove_prefix(&mut self, prefix: &Prefix) -> Result<bool, Box<dyn Error>> {
        if prefix.family() != self.family {
            return Err(format!(
                "Cannot remove {} prefix {prefix} from {} universe",
                prefix.family(),
                self.family
            )
            .into());
        }
        let hole = AddrRange::from(*prefix);

        // Spans are disjoint and sorted, so ends ascend with starts.
        let hit: Vec<AddrRange> = self
            .ranges
            .range(..=hole.end)
            .rev()
            .take_while(|&(_, &end)| end >= hole.start)
            .map(|(&start, &end)| AddrRange {
                family: self.family,
                start,
                end,
            })
            .collect();

        for span in &hit {
            self.ranges.remove(&span.start);
            let (below, above) = span.subtract(&hole);
            for piece in [below, above].into_iter().flatten() {
                self.ranges.insert(piece.start, piece.end);
            }
            log::trace!("remove_prefix({prefix}) split {span}");
        }

        Ok(!hit.is_empty())
    }

    /// Remove a single address.
    pub fn remove_address(&mut self, addr: IpAddr) -> Result<bool, Box<dyn Error>> {
        self.remove_prefix(&Prefix::host(addr))
    }

    /// Current coverage as minimal canonical prefixes, ascending by address.
    pub fn snapshot(&self) -> Vec<Prefix> {
        self.ranges().flat_map(|r| r.prefixes()).collect()
    }
}
