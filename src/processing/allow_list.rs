//! Dual-stack allow-list.
//!
//! Starts from the whole IPv4 and IPv6 space and removes discovered ranges,
//! leaving the complement as CIDR prefixes.

use super::normalize::normalize_all;
use super::universe::AddressUniverse;
use crate::config;
use crate::models::{DiscoveredSet, Family, Prefix};
use std::error::Error;
use std::net::IpAddr;

/// One [`AddressUniverse`] per address family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    pub v4: AddressUniverse,
    pub v6: AddressUniverse,
}

impl AllowList {
    /// Allow-list covering the full IPv4 and IPv6 space.
    pub fn new() -> Result<AllowList, Box<dyn Error>> {
        Ok(AllowList {
            v4: AddressUniverse::new(config::IPV4_RANGE)?,
            v6: AddressUniverse::new(config::IPV6_RANGE)?,
        })
    }

    /// Full allow-list minus every parseable entry of `discovered`.
    pub fn from_discovered(discovered: &DiscoveredSet) -> Result<AllowList, Box<dyn Error>> {
        let mut allow_list = AllowList::new()?;
        let prefixes = normalize_all(discovered.iter());
        let mut changed = 0;
        for prefix in &prefixes {
            if allow_list.remove_prefix(prefix)? {
                changed += 1;
            }
        }
        log::info!(
            "Parsed {} of {} discovered ranges, {changed} changed the allow-list",
            prefixes.len(),
            discovered.len()
        );
        Ok(allow_list)
    }

    fn universe_mut(&mut self, family: Family) -> &mut AddressUniverse {
        match family {
            Family::V4 => &mut self.v4,
            Family::V6 => &mut self.v6,
        }
    }

    /// Remove a prefix from the universe of its own family.
    pub fn remove_prefix(&mut self, prefix: &Prefix) -> Result<bool, Box<dyn Error>> {
        self.universe_mut(prefix.family()).remove_prefix(prefix)
    }

    pub fn remove_address(&mut self, addr: IpAddr) -> Result<bool, Box<dyn Error>> {
        self.universe_mut(Family::of(&addr)).remove_address(addr)
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        self.v4.contains(addr) || self.v6.contains(addr)
    }

    /// IPv4 prefixes followed by IPv6 prefixes.
    pub fn snapshot(&self) -> Vec<Prefix> {
        let mut prefixes = self.v4.snapshot();
        prefixes.extend(self.v6.snapshot());
        prefixes
    }
}
