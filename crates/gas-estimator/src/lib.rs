//! Estimation of the gas parameters of retryable tickets.
//!
//! The inbox reverts with the fully resolved ticket when a retryable is created with a gas limit
//! or a max fee per gas of 1. The [`GasEstimationProbe`] simulates the business call with these
//! sentinel values, decodes the `RetryableData` revert and prices the ticket using a
//! [`bridge_providers::RetryableGasOracle`].

mod config;
pub use config::{
    GasEstimatorConfig, DEFAULT_GAS_LIMIT_PERCENT_INCREASE,
    DEFAULT_MAX_FEE_PER_GAS_PERCENT_INCREASE, DEFAULT_MIN_GAS_LIMIT,
    DEFAULT_SUBMISSION_FEE_PERCENT_INCREASE, MIN_CUSTOM_GATEWAY_GAS_LIMIT,
};

mod error;
pub use error::{GasEstimationError, GasEstimationResult};

mod estimate;
pub use estimate::{EstimatedRetryable, GasEstimate};

mod metrics;
pub use metrics::GasEstimatorMetrics;

mod probe;
pub use probe::{extract_revert_payload, GasEstimationProbe, PreparedRequest};

mod request;
pub use request::{
    BridgeRequest, ChildToParentRequest, ContractClass, GasOverrides, ParentToChildRequest,
    PercentIncrease, RetryableCallBuilder, RetryableGasParams, RetryableTicketCall,
};
