//! Arbitrum network definitions and the registry used to look them up by chain id.

mod config;
pub use config::*;

mod registry;
pub use registry::{ensure_chain_id, NetworkRegistry, RegistryError};
