//! Domain models for the allow-list builder.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Prefix`] - canonical CIDR prefix for either address family
//! - [`AddrRange`] - inclusive start/end span and its CIDR cover
//! - [`DiscoveredSet`] - deduplicated provider range strings

mod discovered;
mod prefix;
mod range;

// Re-export public types
pub use discovered::DiscoveredSet;
pub use prefix::{
    addr_to_bits, bits_to_addr, broadcast_addr, cut_addr, get_cidr_mask, Family, Prefix,
};
pub use range::AddrRange;
