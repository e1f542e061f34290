//! Discovered provider ranges.

use std::collections::BTreeSet;
use std::fmt;

/// Unique range/address strings pulled from one or more providers.
///
/// Entries are deduplicated on their exact text before any parsing, so
/// "10.0.0.0/8" and "10.0.0.1/8" are kept as two entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveredSet {
    /// Ordered so dumps are reproducible.
    pub ranges: BTreeSet<String>,
}

impl DiscoveredSet {
    /// Create a new empty DiscoveredSet.
    pub fn new() -> DiscoveredSet {
        DiscoveredSet {
            ranges: BTreeSet::new(),
        }
    }

    /// Add an entry. Returns false if the exact text was already present.
    pub fn insert(&mut self, range: &str) -> bool {
        self.ranges.insert(range.to_string())
    }

    /// Merge another provider's entries into this set.
    pub fn merge(&mut self, other: DiscoveredSet) {
        self.ranges.extend(other.ranges);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranges.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for DiscoveredSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = DiscoveredSet::new();
        for range in iter {
            set.insert(range);
        }
        set
    }
}

impl fmt::Display for DiscoveredSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiscoveredSet ({} ranges)", self.ranges.len())
    }
}
