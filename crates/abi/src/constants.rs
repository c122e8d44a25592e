use alloy_primitives::{address, Address};

/// The address of the `ArbSys` precompile on every Arbitrum chain.
pub const ARB_SYS_ADDRESS: Address = address!("0x0000000000000000000000000000000000000064");

/// The address of the `NodeInterface` virtual contract on every Arbitrum chain. It can only be
/// reached through `eth_call` and `eth_estimateGas`.
pub const NODE_INTERFACE_ADDRESS: Address = address!("0x00000000000000000000000000000000000000C8");
