/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors produced by this crate.
///
/// Every fallible operation fails atomically: no partially constructed
/// [`Address`](crate::Address) or [`Subnet`](crate::Subnet) is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The address literal failed lexical classification, the mask was not a well-formed
    /// non-negative integer, or the mask exceeded the family's maximum (32 for IPv4, 128 for
    /// IPv6). Carries the offending inputs for diagnostics. Also raised when an operation mixes
    /// address families (e.g. testing an IPv6 address against an IPv4 subnet).
    #[error("invalid IP address: {ip}/{mask}")]
    InvalidAddress { ip: String, mask: String },

    /// A numeric conversion was requested outside its legal domain: a value above the family's
    /// numeric maximum, a family number outside `{4, 6}`, or increment/decrement arithmetic that
    /// would leave the family's address space.
    #[error("invalid conversion: {reason}")]
    InvalidConversion { reason: &'static str },
}

impl Error {
    pub(crate) fn invalid_address(ip: impl Into<String>, mask: impl Into<String>) -> Self {
        Error::InvalidAddress {
            ip: ip.into(),
            mask: mask.into(),
        }
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
