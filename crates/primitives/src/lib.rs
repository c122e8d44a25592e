//! Primitive types for the bridge client.

pub use alias::{
    alias, alias_str, apply_l1_to_l2_alias, undo_l1_to_l2_alias, AliasDirection, AliasError,
    ADDRESS_ALIAS_OFFSET,
};
mod alias;

pub use block::{l1_block_number_from_mix_hash, BlockContext, L2BlockRange};
mod block;

pub use call::CallRequest;
mod call;

pub use message::{DelayedMessageEvent, InboxMessageKind};
mod message;

pub mod network;
pub use network::{ArbitrumNetwork, EthBridge, NetworkRegistry, RegistryError};
