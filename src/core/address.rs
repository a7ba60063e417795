use crate::core::constants::Family;
use crate::core::errors::{Error, Result};
use crate::core::subnet::Subnet;
use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Address
-------------------------------------------------------------------------------------------------*/

/// A single IP address paired with a network mask length.
///
/// The same type handles both IPv4 and IPv6 addresses; the family is resolved once at
/// construction and never changes. The textual form is stored fully expanded (maximized); the
/// compressed (minimized) form is derived on demand and never stored. Construction validates
/// eagerly and fails atomically.
///
/// ```
/// let address = ipsubnet::Address::new("fde8:894a:40c:ee20::1", 64)?;
/// assert_eq!(
///     address.maximize(),
///     "fde8:894a:040c:ee20:0000:0000:0000:0001"
/// );
/// assert_eq!(address.minimize(), "fde8:894a:40c:ee20::1");
/// # Ok::<(), ipsubnet::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Address {
    family: Family,
    text: String,
    prefix_length: u8,
    groups: Vec<u16>,
}

impl Address {
    /// Constructs an `Address` from an IP address literal and a network mask length.
    ///
    /// The family is resolved by the lexical classifier; the mask must not exceed the family's
    /// maximum (32 for IPv4, 128 for IPv6). Either check failing is an
    /// [`Error::InvalidAddress`].
    ///
    /// ```
    /// let address = ipsubnet::Address::new("1.2.3.4", 24)?;
    /// assert_eq!(address.family(), ipsubnet::Family::IPv4);
    /// assert_eq!(address.prefix_length(), 24);
    /// # Ok::<(), ipsubnet::Error>(())
    /// ```
    pub fn new(ip: &str, prefix_length: u8) -> Result<Address> {
        let family = classify(ip)
            .ok_or_else(|| Error::invalid_address(ip, prefix_length.to_string()))?;

        if prefix_length > family.max_prefix_length() {
            return Err(Error::invalid_address(ip, prefix_length.to_string()));
        }

        let groups = parse_groups(family, ip, prefix_length)?;
        let text = render_text(family, &groups);

        trace!("Constructed IPv{} address {}/{}", family, text, prefix_length);

        Ok(Address {
            family,
            text,
            prefix_length,
            groups,
        })
    }

    // Rebuilds an `Address` from a numeric value already known to be within the family's
    // address space. Infallible counterpart of `from_number` used by the masking and
    // arithmetic operations.
    pub(crate) fn from_value(family: Family, value: u128, prefix_length: u8) -> Address {
        let bits = family.bits_per_group();
        let group_mask = (1u128 << bits) - 1;

        let groups: Vec<u16> = (0..family.group_count())
            .rev()
            .map(|position| ((value >> (position * bits)) & group_mask) as u16)
            .collect();
        let text = render_text(family, &groups);

        Address {
            family,
            text,
            prefix_length,
            groups,
        }
    }

    /*----------------------------------------------------------------------------------
      Accessors
    ----------------------------------------------------------------------------------*/

    /// The address family, resolved at construction.
    pub fn family(&self) -> Family {
        self.family
    }

    /// The network mask length.
    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// The address groups, most significant first: four octets (`0..=255`) for IPv4, eight
    /// hextets (`0..=65535`) for IPv6.
    pub fn groups(&self) -> &[u16] {
        &self.groups
    }

    /// The canonical maximized textual form (without the mask).
    pub fn text(&self) -> &str {
        &self.text
    }

    /*----------------------------------------------------------------------------------
      Canonical Textual Forms
    ----------------------------------------------------------------------------------*/

    /// Returns the maximized textual form: dotted-decimal for IPv4; fully expanded,
    /// zero-padded, lowercase hex groups for IPv6. Idempotent; this is the stored form.
    pub fn maximize(&self) -> String {
        self.text.clone()
    }

    /// Returns the minimized textual form. IPv4 addresses are returned unchanged. For IPv6,
    /// leading zeros are stripped from each group (an all-zero group becomes `0`) and the
    /// leftmost maximal run of all-zero groups is elided as `::`.
    ///
    /// ```
    /// let address = ipsubnet::Address::new("fde8:0000:040c:ee20:0000:0000:0000:0002", 64)?;
    /// assert_eq!(address.minimize(), "fde8:0:40c:ee20::2");
    /// # Ok::<(), ipsubnet::Error>(())
    /// ```
    pub fn minimize(&self) -> String {
        if self.family.is_ipv4() {
            return self.text.clone();
        }

        let groups: Vec<String> = self.groups.iter().map(|group| format!("{group:x}")).collect();

        #[derive(Default, Clone, Copy)]
        struct Run {
            start: usize,
            len: usize,
        }

        let mut best = Run::default();
        let mut this = Run::default();

        for (index, &group) in self.groups.iter().enumerate() {
            if group == 0 {
                if this.len == 0 {
                    this.start = index;
                }
                this.len += 1;
            } else {
                if this.len > best.len {
                    best = this;
                }
                this = Run::default();
            }
        }
        if this.len > best.len {
            best = this;
        }

        if best.len == 0 {
            return groups.join(":");
        }

        // The run may touch either end of the address (or span all of it); joining the two
        // sides around a literal "::" renders every placement correctly.
        let head = groups[..best.start].join(":");
        let tail = groups[best.start + best.len..].join(":");
        format!("{head}::{tail}")
    }

    /*----------------------------------------------------------------------------------
      Numeric Conversions
    ----------------------------------------------------------------------------------*/

    /// The address as an unsigned integer: the weighted positional sum of its groups. IPv4
    /// values occupy the low 32 bits of the `u128` domain.
    ///
    /// ```
    /// let address = ipsubnet::Address::new("1.2.3.4", 24)?;
    /// assert_eq!(address.as_number(), 16909060);
    /// # Ok::<(), ipsubnet::Error>(())
    /// ```
    pub fn as_number(&self) -> u128 {
        self.groups.iter().fold(0u128, |value, &group| {
            (value << self.family.bits_per_group()) | u128::from(group)
        })
    }

    /// Converts a numeric value back into an `Address` of the given family, with a full-length
    /// mask (32 or 128). Fails with [`Error::InvalidConversion`] if the value lies outside the
    /// family's address space.
    ///
    /// ```
    /// use ipsubnet::{Address, Family};
    ///
    /// let address = Address::from_number(16909060, Family::IPv4)?;
    /// assert_eq!(address.text(), "1.2.3.4");
    /// # Ok::<(), ipsubnet::Error>(())
    /// ```
    pub fn from_number(value: u128, family: Family) -> Result<Address> {
        if value > family.max_value() {
            return Err(Error::InvalidConversion {
                reason: "value exceeds the family's address space",
            });
        }

        Ok(Address::from_value(family, value, family.max_prefix_length()))
    }

    /*----------------------------------------------------------------------------------
      Mask Arithmetic
    ----------------------------------------------------------------------------------*/

    /// The network mask as an unsigned integer: `prefix_length` one-bits followed by zero-bits
    /// (`2^total_bits - 2^(total_bits - prefix_length)`).
    pub fn mask_as_number(&self) -> u128 {
        self.family.max_value() - self.host_mask()
    }

    // The host portion of the mask: `2^(total_bits - prefix_length) - 1`. Computed from the
    // family maximum so the /0 and /128 boundaries cannot overflow the u128 domain.
    pub(crate) fn host_mask(&self) -> u128 {
        if u32::from(self.prefix_length) == self.family.total_bits() {
            0
        } else {
            self.family.max_value() >> self.prefix_length
        }
    }

    /// Applies the network mask, returning a new `Address` with the host bits cleared and the
    /// same family and prefix length. Does not mutate `self`.
    ///
    /// ```
    /// let address = ipsubnet::Address::new("1.2.3.4", 24)?;
    /// assert_eq!(address.apply_mask().text(), "1.2.3.0");
    /// # Ok::<(), ipsubnet::Error>(())
    /// ```
    pub fn apply_mask(&self) -> Address {
        Address::from_value(
            self.family,
            self.as_number() & self.mask_as_number(),
            self.prefix_length,
        )
    }

    /*----------------------------------------------------------------------------------
      Address Arithmetic
    ----------------------------------------------------------------------------------*/

    /// Returns the address `by` steps forward, with a full-length mask. Stepping past the end
    /// of the family's address space fails with [`Error::InvalidConversion`].
    pub fn increment(&self, by: u128) -> Result<Address> {
        let value = self
            .as_number()
            .checked_add(by)
            .filter(|value| *value <= self.family.max_value())
            .ok_or(Error::InvalidConversion {
                reason: "increment past the end of the address space",
            })?;

        Ok(Address::from_value(
            self.family,
            value,
            self.family.max_prefix_length(),
        ))
    }

    /// Returns the address `by` steps backward, with a full-length mask. Stepping below zero
    /// fails with [`Error::InvalidConversion`].
    pub fn decrement(&self, by: u128) -> Result<Address> {
        let value = self
            .as_number()
            .checked_sub(by)
            .ok_or(Error::InvalidConversion {
                reason: "decrement below the start of the address space",
            })?;

        Ok(Address::from_value(
            self.family,
            value,
            self.family.max_prefix_length(),
        ))
    }

    /*----------------------------------------------------------------------------------
      Subnet Derivation
    ----------------------------------------------------------------------------------*/

    /// Derives the [`Subnet`] implied by this address's network portion and mask.
    pub fn subnet(&self) -> Subnet {
        Subnet::new(self.clone())
    }
}

/*--------------------------------------------------------------------------------------
  Ordering
--------------------------------------------------------------------------------------*/

// Addresses order by family, then numeric value, then prefix length, so they slot into
// ordered collections keyed the way CIDR prefixes conventionally sort.
impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.family, self.as_number(), self.prefix_length).cmp(&(
            other.family,
            other.as_number(),
            other.prefix_length,
        ))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/*--------------------------------------------------------------------------------------
  Display / FromStr
--------------------------------------------------------------------------------------*/

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.text, self.prefix_length)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses the `<address>/<mask>` form; the mask arm accepts only a well-formed
    /// non-negative integer.
    fn from_str(s: &str) -> Result<Self> {
        let (ip, mask) = s
            .split_once('/')
            .ok_or_else(|| Error::invalid_address(s, ""))?;
        let prefix_length: u8 = mask
            .parse()
            .map_err(|_| Error::invalid_address(ip, mask))?;
        Address::new(ip, prefix_length)
    }
}

/*--------------------------------------------------------------------------------------
  Serde
--------------------------------------------------------------------------------------*/

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/*-------------------------------------------------------------------------------------------------
  Lexical Classification and Parsing
-------------------------------------------------------------------------------------------------*/

// Lexical IP-literal classifier. Syntax legality and family detection are delegated to the
// standard library's address grammar; `None` is fatal to construction.
fn classify(ip: &str) -> Option<Family> {
    if ip.parse::<Ipv4Addr>().is_ok() {
        Some(Family::IPv4)
    } else if ip.parse::<Ipv6Addr>().is_ok() {
        Some(Family::IPv6)
    } else {
        None
    }
}

// Splits a classifier-approved literal into its numeric groups, expanding any `::` elision.
fn parse_groups(family: Family, ip: &str, prefix_length: u8) -> Result<Vec<u16>> {
    let invalid = || Error::invalid_address(ip, prefix_length.to_string());

    match family {
        Family::IPv4 => ip
            .split('.')
            .map(|octet| octet.parse::<u8>().map(u16::from).map_err(|_| invalid()))
            .collect(),
        Family::IPv6 => expand_ipv6(ip).ok_or_else(invalid),
    }
}

// Expands an IPv6 literal to its eight hextets: replaces a `::` elision with exactly as many
// zero groups as needed to reach eight, wherever the elision occurs (start, middle, or end).
fn expand_ipv6(ip: &str) -> Option<Vec<u16>> {
    // An embedded dotted quad ("::ffff:1.2.3.4") is rewritten as two hextets first.
    let rewritten;
    let ip = if ip.contains('.') {
        let colon = ip.rfind(':')?;
        let quad: Ipv4Addr = ip[colon + 1..].parse().ok()?;
        let [a, b, c, d] = quad.octets();
        rewritten = format!(
            "{}{:x}:{:x}",
            &ip[..colon + 1],
            u16::from_be_bytes([a, b]),
            u16::from_be_bytes([c, d]),
        );
        rewritten.as_str()
    } else {
        ip
    };

    let groups: Vec<&str> = if let Some((head, tail)) = ip.split_once("::") {
        let head: Vec<&str> = head.split(':').filter(|group| !group.is_empty()).collect();
        let tail: Vec<&str> = tail.split(':').filter(|group| !group.is_empty()).collect();
        let fill = 8usize.checked_sub(head.len() + tail.len())?;

        head.into_iter()
            .chain(std::iter::repeat("0").take(fill))
            .chain(tail)
            .collect()
    } else {
        ip.split(':').collect()
    };

    if groups.len() != 8 {
        return None;
    }

    groups
        .into_iter()
        .map(|group| u16::from_str_radix(group, 16).ok())
        .collect()
}

// Renders the canonical maximized text from parsed groups: dotted decimal for IPv4,
// zero-padded lowercase hex for IPv6.
fn render_text(family: Family, groups: &[u16]) -> String {
    let groups: Vec<String> = match family {
        Family::IPv4 => groups.iter().map(|group| group.to_string()).collect(),
        Family::IPv6 => groups.iter().map(|group| format!("{group:04x}")).collect(),
    };

    groups.join(&family.separator().to_string())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
