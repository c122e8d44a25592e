use bridge_event_scanner::ScannerError;
use bridge_providers::{ChainReaderError, ReadRequest};

/// A [`Result`] that uses [`SearchError`] as the error type.
pub type SearchResult<T> = Result<T, SearchError>;

/// An error occurring during a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The window starts before the first Nitro block, whose headers carry no L1 block number.
    #[error("window start {min} is below the nitro genesis block {nitro_genesis_block}")]
    BeforeNitroGenesis {
        /// The first block of the window.
        min: u64,
        /// The Nitro genesis block of the network.
        nitro_genesis_block: u64,
    },
    /// The window ends before it starts.
    #[error("invalid search window [{min}, {max}]")]
    InvalidRange {
        /// The first block of the window.
        min: u64,
        /// The last block of the window.
        max: u64,
    },
    /// A block kept reporting different L1 block numbers on consecutive reads.
    #[error("block {block} did not settle on an l1 block number after {reads} reads")]
    UnsettledBlock {
        /// The L2 block.
        block: u64,
        /// The reads of the block.
        reads: usize,
    },
    /// The search was cancelled.
    #[error("search cancelled during {request}")]
    Cancelled {
        /// The request in flight.
        request: ReadRequest,
    },
    /// An error at the chain reader.
    #[error("provider error: {0}")]
    Provider(ChainReaderError),
    /// An error while scanning events.
    #[error("scanner error: {0}")]
    Scanner(ScannerError),
}

impl From<ChainReaderError> for SearchError {
    fn from(error: ChainReaderError) -> Self {
        match error {
            ChainReaderError::Cancelled { request } => Self::Cancelled { request },
            error => Self::Provider(error),
        }
    }
}

impl From<ScannerError> for SearchError {
    fn from(error: ScannerError) -> Self {
        match error {
            ScannerError::Cancelled { request } => Self::Cancelled { request },
            ScannerError::Provider(error) => error.into(),
            error => Self::Scanner(error),
        }
    }
}
