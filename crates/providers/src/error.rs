use alloy_primitives::Address;
use alloy_transport::{RpcError, TransportErrorKind};
use std::{fmt, time::Duration};

/// A [`Result`] that uses [`ChainReaderError`] as the error type.
pub type ChainReaderResult<T> = Result<T, ChainReaderError>;

/// The request sent to a node, attached to the errors it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadRequest {
    /// `eth_chainId`.
    ChainId,
    /// `eth_call` to a contract.
    Call {
        /// The called contract.
        to: Address,
    },
    /// `eth_estimateGas` of a call to a contract.
    EstimateGas {
        /// The called contract.
        to: Address,
    },
    /// `eth_getLogs` over a block range.
    Logs {
        /// The first block of the filter.
        from: Option<u64>,
        /// The last block of the filter.
        to: Option<u64>,
    },
    /// `eth_getBlockByNumber` for a block number.
    Block(u64),
    /// `eth_getBlockByNumber` for the latest block.
    LatestBlock,
    /// `eth_blockNumber`.
    BlockNumber,
    /// `eth_gasPrice`.
    GasPrice,
}

impl fmt::Display for ReadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChainId => write!(f, "eth_chainId"),
            Self::Call { to } => write!(f, "eth_call to {to}"),
            Self::EstimateGas { to } => write!(f, "eth_estimateGas to {to}"),
            Self::Logs { from, to } => {
                let bound = |block: &Option<u64>, tag: &str| {
                    block.map_or_else(|| tag.to_string(), |block| block.to_string())
                };
                write!(f, "eth_getLogs [{}, {}]", bound(from, "earliest"), bound(to, "latest"))
            }
            Self::Block(number) => write!(f, "eth_getBlockByNumber {number}"),
            Self::LatestBlock => write!(f, "eth_getBlockByNumber latest"),
            Self::BlockNumber => write!(f, "eth_blockNumber"),
            Self::GasPrice => write!(f, "eth_gasPrice"),
        }
    }
}

/// An error occurring while reading from a chain.
#[derive(Debug, thiserror::Error)]
pub enum ChainReaderError {
    /// An error at the RPC level.
    #[error("{request} failed: {source}")]
    Rpc {
        /// The failed request.
        request: ReadRequest,
        /// The RPC error.
        source: RpcError<TransportErrorKind>,
    },
    /// The request did not complete in time.
    #[error("{request} timed out after {timeout:?}")]
    Timeout {
        /// The timed out request.
        request: ReadRequest,
        /// The timeout applied to the request.
        timeout: Duration,
    },
    /// The request was cancelled before completion.
    #[error("{request} cancelled")]
    Cancelled {
        /// The cancelled request.
        request: ReadRequest,
    },
    /// The requested block does not exist.
    #[error("unknown block {0}")]
    MissingBlock(u64),
    /// A read-only contract call reverted.
    #[error("call to {to} reverted: {reason}")]
    Reverted {
        /// The called contract.
        to: Address,
        /// The serialized revert.
        reason: String,
    },
    /// The node answered with a response that could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ChainReaderError {
    /// Returns the error for the RPC error raised by the request.
    pub fn rpc(request: ReadRequest, error: RpcError<TransportErrorKind>) -> Self {
        match error {
            // the transport task was shut down under the request.
            RpcError::Transport(TransportErrorKind::BackendGone) => Self::Cancelled { request },
            source => Self::Rpc { request, source },
        }
    }

    /// Returns true if the error is a cancellation. Cancelled operations are never retried.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns true if the error is a timeout.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the request which failed, if the error originates from the node.
    pub const fn request(&self) -> Option<ReadRequest> {
        match self {
            Self::Rpc { request, .. } |
            Self::Timeout { request, .. } |
            Self::Cancelled { request } => Some(*request),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_backend_gone_to_cancelled() {
        let gone = TransportErrorKind::backend_gone();
        let err = ChainReaderError::rpc(ReadRequest::BlockNumber, gone);
        assert!(err.is_cancelled());
        assert_eq!(err.request(), Some(ReadRequest::BlockNumber));

        let err = ChainReaderError::rpc(ReadRequest::GasPrice, RpcError::NullResp);
        assert!(matches!(err, ChainReaderError::Rpc { request: ReadRequest::GasPrice, .. }));
        assert!(!err.is_cancelled());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_should_display_failed_request() {
        let to = Address::repeat_byte(0x11);

        let timeout = ChainReaderError::Timeout {
            request: ReadRequest::Block(115),
            timeout: Duration::from_secs(30),
        };
        let cancelled = ChainReaderError::Cancelled { request: ReadRequest::Call { to } };
        let logs = ChainReaderError::rpc(
            ReadRequest::Logs { from: Some(790), to: None },
            RpcError::NullResp,
        );

        assert_eq!(timeout.to_string(), "eth_getBlockByNumber 115 timed out after 30s");
        assert_eq!(cancelled.to_string(), format!("eth_call to {to} cancelled"));
        assert!(logs.to_string().starts_with("eth_getLogs [790, latest] failed"));
        assert_eq!(ReadRequest::EstimateGas { to }.to_string(), format!("eth_estimateGas to {to}"));
    }
}
