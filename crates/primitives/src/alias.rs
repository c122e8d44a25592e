//! L1 to L2 address aliasing.
//!
//! Messages sent from an L1 contract appear on L2 with the sender shifted by a constant offset,
//! so that an L1 contract can never impersonate an L2 account deployed at the same address.

use alloy_primitives::{address, aliases::U160, Address};
use std::str::FromStr;

/// The offset applied to L1 contract addresses when they act as the sender of an L2 message.
pub const ADDRESS_ALIAS_OFFSET: Address = address!("0x1111000000000000000000000000000000001111");

/// The direction in which to apply the alias offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasDirection {
    /// L1 address to its L2 alias.
    Apply,
    /// L2 alias back to the originating L1 address.
    Undo,
}

impl FromStr for AliasDirection {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apply" => Ok(Self::Apply),
            "undo" => Ok(Self::Undo),
            _ => Err(AliasError::InvalidDirection(s.to_string())),
        }
    }
}

/// An error that occurred while aliasing an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// The provided string is not a 20 byte hex address.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    /// The provided string is not a known alias direction.
    #[error("invalid alias direction {0:?}, expected `apply` or `undo`")]
    InvalidDirection(String),
}

/// Applies or removes the alias offset, modulo 2^160.
pub fn alias(address: Address, direction: AliasDirection) -> Address {
    let value = U160::from_be_bytes(address.0 .0);
    let offset = U160::from_be_bytes(ADDRESS_ALIAS_OFFSET.0 .0);

    // ruint arithmetic wraps at the type width, which is exactly the 2^160 modulus and always
    // yields the non-negative residue.
    let aliased = match direction {
        AliasDirection::Apply => value.wrapping_add(offset),
        AliasDirection::Undo => value.wrapping_sub(offset),
    };

    Address::from(aliased.to_be_bytes::<20>())
}

/// Parses a hex address and aliases it, see [`alias`].
pub fn alias_str(address: &str, direction: AliasDirection) -> Result<Address, AliasError> {
    let trimmed = address.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != 40 {
        return Err(AliasError::InvalidAddress(address.to_string()));
    }
    let parsed =
        Address::from_str(digits).map_err(|_| AliasError::InvalidAddress(address.to_string()))?;
    Ok(alias(parsed, direction))
}

/// Returns the L2 alias of an L1 address.
pub fn apply_l1_to_l2_alias(address: Address) -> Address {
    alias(address, AliasDirection::Apply)
}

/// Returns the L1 address behind an L2 alias.
pub fn undo_l1_to_l2_alias(address: Address) -> Address {
    alias(address, AliasDirection::Undo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    const L1_ADDRESS: Address = address!("0xFfC98231ef2fd1F77106E10581A1faC14E29d014");
    const ALIASED: Address = address!("0x10da8231ef2fd1f77106e10581a1fac14e29e125");
    const UNALIASED: Address = address!("0xeeb88231ef2fd1f77106e10581a1fac14e29bf03");

    fn from_u256(value: U256) -> Address {
        Address::from_word(value.into())
    }

    #[test]
    fn test_should_alias_known_address() {
        assert_eq!(apply_l1_to_l2_alias(L1_ADDRESS), ALIASED);
        assert_eq!(undo_l1_to_l2_alias(L1_ADDRESS), UNALIASED);

        // any of the three reproduces the other two.
        assert_eq!(undo_l1_to_l2_alias(ALIASED), L1_ADDRESS);
        assert_eq!(apply_l1_to_l2_alias(UNALIASED), L1_ADDRESS);
        assert_eq!(undo_l1_to_l2_alias(undo_l1_to_l2_alias(ALIASED)), UNALIASED);
        assert_eq!(apply_l1_to_l2_alias(apply_l1_to_l2_alias(UNALIASED)), ALIASED);
    }

    #[test]
    fn test_should_render_padded_lowercase_hex() {
        let aliased = apply_l1_to_l2_alias(Address::ZERO);
        assert_eq!(
            format!("{aliased:x}"),
            "1111000000000000000000000000000000001111".to_string()
        );

        let unaliased = undo_l1_to_l2_alias(ADDRESS_ALIAS_OFFSET);
        assert_eq!(unaliased, Address::ZERO);
        assert_eq!(unaliased.to_string().len(), 42);
    }

    #[test]
    fn test_should_wrap_around_the_address_space() {
        let max = Address::repeat_byte(0xff);

        // 2^160 - 1 + offset wraps to offset - 1.
        let expected = from_u256(U256::from_be_slice(ADDRESS_ALIAS_OFFSET.as_slice()) - U256::ONE);
        assert_eq!(apply_l1_to_l2_alias(max), expected);

        // 0 - offset wraps to 2^160 - offset.
        let expected = from_u256(
            (U256::ONE << 160) - U256::from_be_slice(ADDRESS_ALIAS_OFFSET.as_slice()),
        );
        assert_eq!(undo_l1_to_l2_alias(Address::ZERO), expected);
    }

    #[test]
    fn test_should_round_trip_boundaries() {
        let offset = U256::from_be_slice(ADDRESS_ALIAS_OFFSET.as_slice());
        let modulus = U256::ONE << 160;

        let mut candidates = vec![Address::ZERO, Address::repeat_byte(0xff)];
        for delta in 0..=10u64 {
            let delta = U256::from(delta);
            candidates.push(from_u256(offset + delta));
            candidates.push(from_u256(offset - delta));
            candidates.push(from_u256(modulus - offset + delta));
            candidates.push(from_u256(modulus - offset - delta));
            candidates.push(from_u256(delta));
            candidates.push(from_u256(modulus - U256::ONE - delta));
        }

        for a in candidates {
            assert_eq!(undo_l1_to_l2_alias(apply_l1_to_l2_alias(a)), a, "undo(apply({a}))");
            assert_eq!(apply_l1_to_l2_alias(undo_l1_to_l2_alias(a)), a, "apply(undo({a}))");
        }
    }

    #[test]
    fn test_should_round_trip_random_addresses() {
        for _ in 0..1_000 {
            let a = Address::from(rand::random::<[u8; 20]>());
            assert_eq!(alias(alias(a, AliasDirection::Apply), AliasDirection::Undo), a);
            assert_eq!(alias(alias(a, AliasDirection::Undo), AliasDirection::Apply), a);
        }
    }

    #[test]
    fn test_should_parse_and_alias_strings() -> eyre::Result<()> {
        let aliased =
            alias_str("0xFfC98231ef2fd1F77106E10581A1faC14E29d014", AliasDirection::Apply)?;
        assert_eq!(aliased, ALIASED);

        let unaliased =
            alias_str("ffc98231ef2fd1f77106e10581a1fac14e29d014", AliasDirection::Undo)?;
        assert_eq!(unaliased, UNALIASED);

        Ok(())
    }

    #[test]
    fn test_should_reject_malformed_addresses() {
        for input in [
            "",
            "0x",
            "0x1234",
            "0xzz c98231ef2fd1f77106e10581a1fac14e29d014",
            "0x00ffc98231ef2fd1f77106e10581a1fac14e29d014",
        ] {
            assert_eq!(
                alias_str(input, AliasDirection::Apply),
                Err(AliasError::InvalidAddress(input.to_string()))
            );
        }
    }

    #[test]
    fn test_should_parse_direction() {
        assert_eq!("apply".parse::<AliasDirection>(), Ok(AliasDirection::Apply));
        assert_eq!("Undo".parse::<AliasDirection>(), Ok(AliasDirection::Undo));
        assert!("sideways".parse::<AliasDirection>().is_err());
    }
}
