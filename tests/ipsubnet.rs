use ipsubnet::{Address, Error, Family};
use proptest::prelude::*;

/*-------------------------------------------------------------------------------------------------
  ipsubnet Library Tests
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  End-to-End Scenarios
--------------------------------------------------------------------------------------*/

#[test]
fn apply_mask_clears_host_bits() {
    let address = Address::new("1.2.3.4", 24).unwrap();
    assert_eq!(address.apply_mask().text(), "1.2.3.0");
}

#[test]
fn ipv4_address_as_number() {
    let address = Address::new("1.2.3.4", 24).unwrap();
    assert_eq!(address.as_number(), 16909060);
}

#[test]
fn ipv6_address_maximize() {
    let address = Address::new("fde8:894a:40c:ee20::1", 64).unwrap();
    assert_eq!(
        address.maximize(),
        "fde8:894a:040c:ee20:0000:0000:0000:0001"
    );
}

#[test]
fn ipv6_address_minimize() {
    let address = Address::new("fde8:894a:040c:ee20:0000:0000:0000:0001", 64).unwrap();
    assert_eq!(address.minimize(), "fde8:894a:40c:ee20::1");
}

#[test]
fn ipv6_minimize_keeps_short_zero_run_as_bare_zero() {
    let address = Address::new("fde8:0000:040c:ee20:0000:0000:0000:0002", 64).unwrap();
    assert_eq!(address.minimize(), "fde8:0:40c:ee20::2");
}

#[test]
fn mask_bounds_are_enforced() {
    assert!(matches!(
        "1.2.3.4/-1".parse::<Address>(),
        Err(Error::InvalidAddress { .. })
    ));
    assert!(matches!(
        Address::new("1.2.3.4", 33),
        Err(Error::InvalidAddress { .. })
    ));
    assert!(Address::new("1.2.3.4", 0).is_ok());
    assert!(Address::new("1.2.3.4", 32).is_ok());
}

#[test]
fn from_number_round_trip_and_domain_errors() {
    let address = Address::from_number(16909060, Family::IPv4).unwrap();
    assert_eq!(address.text(), "1.2.3.4");

    // A family number outside {4, 6} is an invalid conversion.
    assert!(matches!(
        Family::try_from(5),
        Err(Error::InvalidConversion { .. })
    ));

    // So is a value outside the family's address space.
    assert!(matches!(
        Address::from_number(1 << 32, Family::IPv4),
        Err(Error::InvalidConversion { .. })
    ));
}

#[test]
fn cross_family_membership_checks_fail() {
    let ipv4 = Address::new("1.2.3.4", 24).unwrap();
    let ipv6 = Address::new("fde8:894a:40c:ee20::1", 64).unwrap();

    assert!(matches!(
        ipv4.subnet().is_in_subnet(&ipv6),
        Err(Error::InvalidAddress { .. })
    ));
    assert!(matches!(
        ipv6.subnet().is_in_subnet(&ipv4),
        Err(Error::InvalidAddress { .. })
    ));
}

/*--------------------------------------------------------------------------------------
  Serialization
--------------------------------------------------------------------------------------*/

#[test]
fn address_serializes_as_cidr_string() {
    let address = Address::new("1.2.3.4", 24).unwrap();
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, r#""1.2.3.4/24""#);

    let deserialized: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, address);
}

#[test]
fn address_deserialization_rejects_invalid_input() {
    for invalid in [r#""1.2.3.4""#, r#""1.2.3.4/33""#, r#""bogus/24""#] {
        assert!(serde_json::from_str::<Address>(invalid).is_err(), "{invalid}");
    }
}

/*--------------------------------------------------------------------------------------
  Properties
--------------------------------------------------------------------------------------*/

// Builds a maximized IPv6 literal from eight arbitrary hextets.
fn ipv6_literal(groups: [u16; 8]) -> String {
    groups
        .iter()
        .map(|group| format!("{group:04x}"))
        .collect::<Vec<_>>()
        .join(":")
}

proptest! {
    /*-----------------------------------------------------------------------------
      Round-Trip: text -> number -> text
    -----------------------------------------------------------------------------*/

    #[test]
    fn ipv4_number_round_trip_is_identity(value in proptest::num::u32::ANY) {
        let address = Address::from_number(u128::from(value), Family::IPv4).unwrap();
        let round_tripped =
            Address::from_number(address.as_number(), Family::IPv4).unwrap();
        prop_assert_eq!(round_tripped.text(), address.text());
    }

    #[test]
    fn ipv6_number_round_trip_is_identity(value in proptest::num::u128::ANY) {
        let address = Address::from_number(value, Family::IPv6).unwrap();
        prop_assert_eq!(address.as_number(), value);

        let round_tripped =
            Address::from_number(address.as_number(), Family::IPv6).unwrap();
        prop_assert_eq!(round_tripped.text(), address.text());
    }

    /*-----------------------------------------------------------------------------
      Maximize / Minimize
    -----------------------------------------------------------------------------*/

    #[test]
    fn minimize_preserves_value(groups in proptest::array::uniform8(proptest::num::u16::ANY)) {
        let address = Address::new(&ipv6_literal(groups), 128).unwrap();
        let reparsed = Address::new(&address.minimize(), 128).unwrap();
        prop_assert_eq!(reparsed.maximize(), address.maximize());
        prop_assert_eq!(reparsed.as_number(), address.as_number());
    }

    #[test]
    fn maximize_is_idempotent(groups in proptest::array::uniform8(proptest::num::u16::ANY)) {
        let address = Address::new(&ipv6_literal(groups), 128).unwrap();
        let remaximized = Address::new(&address.maximize(), 128).unwrap();
        prop_assert_eq!(remaximized.maximize(), address.maximize());
    }

    #[test]
    fn minimize_is_stable(groups in proptest::array::uniform8(proptest::num::u16::ANY)) {
        let address = Address::new(&ipv6_literal(groups), 128).unwrap();
        let minimized = address.minimize();
        let reparsed = Address::new(&minimized, 128).unwrap();
        prop_assert_eq!(reparsed.minimize(), minimized);
    }

    /*-----------------------------------------------------------------------------
      Mask Bit Patterns
    -----------------------------------------------------------------------------*/

    #[test]
    fn ipv4_mask_has_prefix_length_leading_ones(prefix_length in 0u8..=32) {
        let mask = Address::new("1.2.3.4", prefix_length).unwrap().mask_as_number();
        prop_assert_eq!(mask.count_ones(), u32::from(prefix_length));
        prop_assert_eq!((mask << 96).leading_ones(), u32::from(prefix_length));
    }

    #[test]
    fn ipv6_mask_has_prefix_length_leading_ones(prefix_length in 0u8..=128) {
        let mask = Address::new("::1", prefix_length).unwrap().mask_as_number();
        prop_assert_eq!(mask.count_ones(), u32::from(prefix_length));
        prop_assert_eq!(mask.leading_ones(), u32::from(prefix_length));
    }

    /*-----------------------------------------------------------------------------
      Subnet Containment
    -----------------------------------------------------------------------------*/

    #[test]
    fn subnet_contains_its_network_address(
        value in proptest::num::u128::ANY,
        prefix_length in 0u8..=128,
    ) {
        let literal = Address::from_number(value, Family::IPv6).unwrap().text().to_string();
        let subnet = Address::new(&literal, prefix_length).unwrap().subnet();
        let network_address = subnet.network_address().clone();
        prop_assert!(subnet.is_in_subnet(&network_address).unwrap());
    }

    #[test]
    fn subnet_range_covers_the_parent(
        value in proptest::num::u32::ANY,
        prefix_length in 0u8..=32,
    ) {
        let literal = Address::from_number(u128::from(value), Family::IPv4)
            .unwrap()
            .text()
            .to_string();
        let parent = Address::new(&literal, prefix_length).unwrap();
        let subnet = parent.subnet();

        prop_assert!(subnet.is_in_subnet(&parent).unwrap());
        prop_assert!(subnet.smallest_address_as_number() <= parent.as_number());
        prop_assert!(parent.as_number() <= subnet.largest_address_as_number());
    }
}
