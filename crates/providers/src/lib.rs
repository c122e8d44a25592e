//! The crate exposes the chain access used across the bridge client: a [`ChainReader`] over the
//! parent and child chains and a [`RetryableGasOracle`] quoting the gas of retryable tickets.

mod error;
pub use error::{ChainReaderError, ChainReaderResult, ReadRequest};

pub use reader::{
    read_contract, AlloyChainReader, CallOutcome, ChainReader, DEFAULT_REQUEST_TIMEOUT,
};
mod reader;

pub use gas_oracle::{NodeInterfaceGasOracle, RetryableGasOracle};
mod gas_oracle;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;
