use crate::core::address::Address;
use crate::core::errors::{Error, Result};
use log::trace;

/*-------------------------------------------------------------------------------------------------
  Subnet
-------------------------------------------------------------------------------------------------*/

/// The address range implied by an [`Address`]'s network portion and mask length.
///
/// A `Subnet` is a pure function of its parent `Address`: it holds the parent and the network
/// address obtained by masking it, and is recomputed rather than mutated. Deriving a `Subnet`
/// from an already valid `Address` never fails.
///
/// ```
/// let address = ipsubnet::Address::new("1.2.3.4", 24)?;
/// let subnet = address.subnet();
///
/// assert_eq!(subnet.network_address().text(), "1.2.3.0");
/// assert!(subnet.is_in_subnet(&ipsubnet::Address::new("1.2.3.200", 32)?)?);
/// # Ok::<(), ipsubnet::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subnet {
    parent: Address,
    network_address: Address,
}

impl Subnet {
    /// Derives the subnet of `parent` by applying its network mask.
    pub fn new(parent: Address) -> Subnet {
        let network_address = parent.apply_mask();

        trace!(
            "Derived subnet {} from {}",
            network_address,
            parent
        );

        Subnet {
            parent,
            network_address,
        }
    }

    /*----------------------------------------------------------------------------------
      Accessors
    ----------------------------------------------------------------------------------*/

    /// The address this subnet was derived from.
    pub fn parent(&self) -> &Address {
        &self.parent
    }

    /// The parent address with its host bits cleared; same family and prefix length as the
    /// parent.
    pub fn network_address(&self) -> &Address {
        &self.network_address
    }

    /*----------------------------------------------------------------------------------
      Membership
    ----------------------------------------------------------------------------------*/

    /// Guards cross-family comparisons: fails with [`Error::InvalidAddress`] unless `address`
    /// belongs to the same family as this subnet.
    pub fn is_matching_family(&self, address: &Address) -> Result<()> {
        if self.parent.family() != address.family() {
            return Err(Error::invalid_address(
                address.text(),
                address.prefix_length().to_string(),
            ));
        }
        Ok(())
    }

    /// Tests whether `address` falls within this subnet, inclusive on both ends: the network
    /// address and the last address of the range both count as "in subnet". Comparing across
    /// address families fails with [`Error::InvalidAddress`] rather than returning a
    /// meaningless boolean.
    pub fn is_in_subnet(&self, address: &Address) -> Result<bool> {
        self.is_matching_family(address)?;

        let value = address.as_number();
        Ok(self.smallest_address_as_number() <= value && value <= self.largest_address_as_number())
    }

    /*----------------------------------------------------------------------------------
      Range Boundaries
    ----------------------------------------------------------------------------------*/

    /// The smallest address in the range (the network address) as a number.
    pub fn smallest_address_as_number(&self) -> u128 {
        self.network_address.as_number()
    }

    /// The largest address in the range as a number:
    /// `network + 2^(total_bits - prefix_length) - 1`. For a full-length mask (/32 or /128)
    /// this degenerates to the network address itself.
    pub fn largest_address_as_number(&self) -> u128 {
        self.network_address.as_number() + self.network_address.host_mask()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
