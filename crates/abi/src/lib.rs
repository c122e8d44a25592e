//! Contract bindings and codecs for the Arbitrum bridge contracts.

/// ABI bindings of the bridge contracts.
pub mod abi;

mod constants;
pub use constants::{ARB_SYS_ADDRESS, NODE_INTERFACE_ADDRESS};

pub use retryable::RetryableTicketParameters;
mod retryable;
