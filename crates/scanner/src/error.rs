use bridge_primitives::RegistryError;
use bridge_providers::{ChainReaderError, ReadRequest};

/// A [`Result`] that uses [`ScannerError`] as the error type.
pub type ScannerResult<T> = Result<T, ScannerError>;

/// An error occurring while scanning events.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// The resolved range ends before it starts.
    #[error("invalid block range [{from}, {to}]")]
    InvalidRange {
        /// The resolved start of the range.
        from: u64,
        /// The resolved end of the range.
        to: u64,
    },
    /// The reader does not serve the scanned network.
    #[error(transparent)]
    Network(#[from] RegistryError),
    /// The scan was cancelled.
    #[error("event scan cancelled during {request}")]
    Cancelled {
        /// The request in flight.
        request: ReadRequest,
    },
    /// An error at the chain reader.
    #[error("provider error: {0}")]
    Provider(ChainReaderError),
}

impl ScannerError {
    /// Returns true if a log query timed out.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Provider(err) if err.is_timeout())
    }
}

impl From<ChainReaderError> for ScannerError {
    fn from(error: ChainReaderError) -> Self {
        match error {
            ChainReaderError::Cancelled { request } => Self::Cancelled { request },
            error => Self::Provider(error),
        }
    }
}
