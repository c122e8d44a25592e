//! Constants related to the bridge tools.

/// The max retries for the providers.
pub(crate) const PROVIDER_MAX_RETRIES: u32 = 10;

/// The initial backoff for the providers, in milliseconds.
pub(crate) const PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The default compute units per second of the providers.
pub(crate) const PROVIDER_COMPUTE_UNITS_PER_SECOND: u64 = 10000;

/// The default timeout of a single request, in seconds.
pub(crate) const PROVIDER_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// The chain id of Arbitrum One, the default network.
pub(crate) const DEFAULT_CHAIN_ID: u64 = 42161;
