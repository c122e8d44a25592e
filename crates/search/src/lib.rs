//! Searches over the history of the parent and child chains.
//!
//! The [`BlockCorrelationSearch`] maps an L1 block number to the L2 blocks produced while it was
//! canonical. The [`InclusionRangeSearch`] finds the most recent delayed message old enough to be
//! force included.

mod correlation;
pub use correlation::{BlockCorrelationSearch, SearchWindow};

mod error;
pub use error::{SearchError, SearchResult};

mod inclusion;
pub use inclusion::{
    ForceInclusionParams, InclusionRangeSearch, InclusionSearchConfig,
    DEFAULT_PARENT_BLOCK_TIME_SECONDS, DEFAULT_RANGE_MULTIPLIER, DEFAULT_START_SEARCH_RANGE_BLOCKS,
    MAX_SEARCH_RANGE_BLOCKS, MIN_WALK_BACK_BLOCKS,
};

mod metrics;
pub use metrics::SearchMetrics;
