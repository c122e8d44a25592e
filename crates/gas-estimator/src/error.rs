use alloy_primitives::{Address, Bytes};
use bridge_providers::{ChainReaderError, ReadRequest};

/// A [`Result`] that uses [`GasEstimationError`] as the error type.
pub type GasEstimationResult<T> = Result<T, GasEstimationError>;

/// An error occurring while estimating the gas of a retryable ticket.
#[derive(Debug, thiserror::Error)]
pub enum GasEstimationError {
    /// The simulated call did not revert.
    #[error("sentinel call to {to} did not revert")]
    UnexpectedSuccess {
        /// The called contract.
        to: Address,
    },
    /// The call reverted without a payload in any of the supported error shapes.
    #[error("no revert data in the error returned for the call to {to}: {error}")]
    NoRevertData {
        /// The called contract.
        to: Address,
        /// The error returned by the node.
        error: serde_json::Value,
    },
    /// The revert payload is not a `RetryableData` error.
    #[error("revert of the call to {to} is not retryable data: {payload}")]
    NotRetryableData {
        /// The called contract.
        to: Address,
        /// The revert payload.
        payload: Bytes,
    },
    /// The operation was cancelled.
    #[error("gas estimation cancelled during {request}")]
    Cancelled {
        /// The request in flight.
        request: ReadRequest,
    },
    /// A transient error at the chain reader or the gas oracle.
    #[error("provider error: {0}")]
    Provider(ChainReaderError),
}

impl GasEstimationError {
    /// Returns true if the error was raised by the chain access and the whole estimation may be
    /// retried.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

impl From<ChainReaderError> for GasEstimationError {
    fn from(error: ChainReaderError) -> Self {
        match error {
            ChainReaderError::Cancelled { request } => Self::Cancelled { request },
            error => Self::Provider(error),
        }
    }
}
