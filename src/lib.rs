//! Represent, normalize, convert, and subnet-match IPv4 and IPv6 addresses.
//!
//! This crate provides a single value type, [`Address`], that works uniformly across both
//! address families: it parses textual address literals, produces canonical maximized and
//! minimized textual forms, converts to and from unsigned integer representation (`u128`,
//! covering the full 128-bit IPv6 range), and computes network masks. A [`Subnet`] is derived
//! from an `Address` on demand and owns membership testing and the subnet's range boundaries.
//!
//! Both types are immutable after construction and purely computational: no I/O, no shared
//! state, and every operation completes in time bounded by the fixed group count, so values
//! may be freely shared across threads.
//!
//! ## Quick Start
//!
//! ```
//! use ipsubnet::{Address, Family};
//!
//! // Construction resolves the family and canonicalizes the text eagerly.
//! let address = Address::new("fde8:894a:40c:ee20::1", 64)?;
//! assert_eq!(address.family(), Family::IPv6);
//! assert_eq!(
//!     address.maximize(),
//!     "fde8:894a:040c:ee20:0000:0000:0000:0001"
//! );
//! assert_eq!(address.minimize(), "fde8:894a:40c:ee20::1");
//!
//! // Numeric conversions round-trip through the u128 domain.
//! let address = Address::new("1.2.3.4", 24)?;
//! assert_eq!(address.as_number(), 16909060);
//! assert_eq!(Address::from_number(16909060, Family::IPv4)?.text(), "1.2.3.4");
//!
//! // Subnet membership is inclusive on both ends of the range.
//! let subnet = address.subnet();
//! assert_eq!(subnet.network_address().text(), "1.2.3.0");
//! assert!(subnet.is_in_subnet(&Address::new("1.2.3.255", 32)?)?);
//! assert!(!subnet.is_in_subnet(&Address::new("1.2.4.0", 32)?)?);
//! # Ok::<(), ipsubnet::Error>(())
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

pub mod core;

/*-------------------------------------------------------------------------------------------------
  Public API
-------------------------------------------------------------------------------------------------*/

pub use crate::core::address::Address;
pub use crate::core::constants::Family;
pub use crate::core::errors::{Error, Result};
pub use crate::core::subnet::Subnet;
