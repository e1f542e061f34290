//! CIDR prefix and address-family utilities.
//!
//! Provides [`Prefix`] for representing an IPv4 or IPv6 network in CIDR
//! notation, along with the bit helpers used by the reduction engine. Both
//! families are handled as `u128` values sized to the family width.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// IP address family. The two families never share a universe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Family of an address.
    pub fn of(addr: &IpAddr) -> Family {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Maximum prefix length (address width in bits).
    pub fn max_length(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// All address bits set for this family.
    pub fn all_bits(self) -> u128 {
        u128::MAX >> (128 - self.max_length() as u32)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// Convert an address to its integer value.
pub fn addr_to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u32::from(a) as u128,
        IpAddr::V6(a) => u128::from(a),
    }
}

/// Convert an integer value back to an address of the given family.
///
/// IPv4 values are truncated to 32 bits.
pub fn bits_to_addr(family: Family, bits: u128) -> IpAddr {
    match family {
        Family::V4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        Family::V6 => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// Convert a CIDR prefix length to a network mask for the family.
///
/// # Examples
/// ```
/// use cloud_allowlist::models::{get_cidr_mask, Family};
/// assert_eq!(get_cidr_mask(Family::V4, 24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(family: Family, len: u8) -> Result<u128, Box<dyn Error>> {
    let max = family.max_length();
    if len > max {
        Err(format!("Network length /{len} is too long for {family}").into())
    } else if len == 0 {
        Ok(0)
    } else {
        let right_len = (max - len) as u32;
        Ok((family.all_bits() >> right_len) << right_len)
    }
}

/// Get the network address bits for a value and prefix length.
pub fn cut_addr(family: Family, bits: u128, len: u8) -> Result<u128, Box<dyn Error>> {
    Ok(bits & get_cidr_mask(family, len)?)
}

/// Get the broadcast (highest) address bits for a value and prefix length.
pub fn broadcast_addr(family: Family, bits: u128, len: u8) -> Result<u128, Box<dyn Error>> {
    let mask = get_cidr_mask(family, len)?;
    Ok((bits & mask) | (!mask & family.all_bits()))
}

/// Parse a prefix length: plain decimal digits, no sign, no leading zero.
fn parse_mask(mask: &str) -> Result<u8, Box<dyn Error>> {
    let digits_only = !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit());
    let leading_zero = mask.len() > 1 && mask.starts_with('0');
    if !digits_only || leading_zero {
        return Err(format!("Invalid prefix length {mask:?}").into());
    }
    mask.parse()
        .map_err(|_| format!("Invalid prefix length {mask:?}").into())
}

/// IP network in CIDR notation with a canonical base address.
///
/// Ordering is by family (IPv4 first), then address, then prefix length, so
/// sorting a list puts shorter prefixes first on equal start addresses.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Prefix {
    /// The network address, host bits always zero.
    pub addr: IpAddr,
    /// The prefix length (0-32 or 0-128).
    pub mask: u8,
}

impl Prefix {
    /// Create a new [`Prefix`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Host bits beyond the prefix length are cleared, so "10.0.0.1/8"
    /// becomes "10.0.0.0/8".
    pub fn new(addr_cidr: &str) -> Result<Prefix, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| format!("Invalid address/mask {addr_cidr:?}"))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr:?}"))?;
        Prefix::from_parts(addr, parse_mask(mask)?)
    }

    /// Build a canonical prefix from an address and length.
    pub fn from_parts(addr: IpAddr, mask: u8) -> Result<Prefix, Box<dyn Error>> {
        let family = Family::of(&addr);
        let bits = addr_to_bits(addr);
        let network = cut_addr(family, bits, mask)?;
        if network != bits {
            log::trace!("Prefix {addr}/{mask} has host bits set, using network address");
        }
        Ok(Prefix {
            addr: bits_to_addr(family, network),
            mask,
        })
    }

    /// Single-address prefix (/32 or /128).
    pub fn host(addr: IpAddr) -> Prefix {
        Prefix {
            addr,
            mask: Family::of(&addr).max_length(),
        }
    }

    pub fn family(&self) -> Family {
        Family::of(&self.addr)
    }

    /// Lowest (network) address bits.
    pub fn lo(&self) -> u128 {
        addr_to_bits(self.addr)
    }

    /// Highest (broadcast) address bits.
    pub fn hi(&self) -> u128 {
        // mask is validated on construction
        broadcast_addr(self.family(), self.lo(), self.mask)
            .unwrap_or_else(|e| panic!("Error calculating broadcast address for {self}: {e}"))
    }

    /// Whether the prefix covers the address.
    pub fn contains(&self, addr: IpAddr) -> bool {
        let bits = addr_to_bits(addr);
        Family::of(&addr) == self.family() && self.lo() <= bits && bits <= self.hi()
    }
}

impl FromStr for Prefix {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::new(s)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s:?}: {e}")))
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
