use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  IPv4 Parameters
-------------------------------------------------------------------------------------------------*/

/// Number of address groups (octets) in an IPv4 address.
pub const IPV4_GROUPS: u32 = 4;

/// Bits per IPv4 address group.
pub const IPV4_BITS_PER_GROUP: u32 = 8;

/// Text radix of an IPv4 address group.
pub const IPV4_RADIX: u32 = 10;

/// Maximum IPv4 network mask length.
pub const IPV4_MASK_MAX: u8 = 32;

/*-------------------------------------------------------------------------------------------------
  IPv6 Parameters
-------------------------------------------------------------------------------------------------*/

/// Number of address groups (hextets) in an IPv6 address.
pub const IPV6_GROUPS: u32 = 8;

/// Bits per IPv6 address group.
pub const IPV6_BITS_PER_GROUP: u32 = 16;

/// Text radix of an IPv6 address group.
pub const IPV6_RADIX: u32 = 16;

/// Maximum IPv6 network mask length.
pub const IPV6_MASK_MAX: u8 = 128;

/*-------------------------------------------------------------------------------------------------
  Address Family
-------------------------------------------------------------------------------------------------*/

/// IP address family (IPv4 or IPv6); selects the per-family numeric parameters used by
/// [`Address`](crate::Address) and [`Subnet`](crate::Subnet).
#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Family {
    IPv4,
    IPv6,
}

impl Family {
    pub fn is_ipv4(&self) -> bool {
        match self {
            Family::IPv4 => true,
            Family::IPv6 => false,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        match self {
            Family::IPv4 => false,
            Family::IPv6 => true,
        }
    }

    /// Number of address groups: `4` for IPv4, `8` for IPv6.
    pub fn group_count(&self) -> u32 {
        match self {
            Family::IPv4 => IPV4_GROUPS,
            Family::IPv6 => IPV6_GROUPS,
        }
    }

    /// Bits per address group: `8` for IPv4, `16` for IPv6.
    pub fn bits_per_group(&self) -> u32 {
        match self {
            Family::IPv4 => IPV4_BITS_PER_GROUP,
            Family::IPv6 => IPV6_BITS_PER_GROUP,
        }
    }

    /// Text radix of a group: decimal for IPv4, hexadecimal for IPv6.
    pub fn radix(&self) -> u32 {
        match self {
            Family::IPv4 => IPV4_RADIX,
            Family::IPv6 => IPV6_RADIX,
        }
    }

    /// Group separator in the textual form.
    pub fn separator(&self) -> char {
        match self {
            Family::IPv4 => '.',
            Family::IPv6 => ':',
        }
    }

    /// Maximum network mask length: `32` for IPv4, `128` for IPv6.
    pub fn max_prefix_length(&self) -> u8 {
        match self {
            Family::IPv4 => IPV4_MASK_MAX,
            Family::IPv6 => IPV6_MASK_MAX,
        }
    }

    /// Total bits in the address space (`group_count * bits_per_group`).
    pub fn total_bits(&self) -> u32 {
        self.group_count() * self.bits_per_group()
    }

    /// Largest numeric address value in the family (`2^total_bits - 1`).
    pub fn max_value(&self) -> u128 {
        match self {
            Family::IPv4 => u32::MAX as u128,
            Family::IPv6 => u128::MAX,
        }
    }
}

/*--------------------------------------------------------------------------------------
  Family Number Conversions
--------------------------------------------------------------------------------------*/

impl TryFrom<u8> for Family {
    type Error = Error;

    /// Converts the conventional family numbers `4` and `6`; any other value is an
    /// [`Error::InvalidConversion`].
    fn try_from(value: u8) -> Result<Self> {
        match value {
            4 => Ok(Family::IPv4),
            6 => Ok(Family::IPv6),
            _ => Err(Error::InvalidConversion {
                reason: "IP address family must be 4 or 6",
            }),
        }
    }
}

impl From<Family> for u8 {
    fn from(value: Family) -> Self {
        match value {
            Family::IPv4 => 4,
            Family::IPv6 => 6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&u8::from(*self), f)
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "4" => Ok(Family::IPv4),
            "6" => Ok(Family::IPv6),
            _ => Err(Error::InvalidConversion {
                reason: "IP address family must be 4 or 6",
            }),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
