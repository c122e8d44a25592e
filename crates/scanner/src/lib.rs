//! Scans bridge events across the classic and nitro eras of an Arbitrum chain.
//!
//! An outbound message is emitted under a different event schema depending on whether its block
//! predates the Nitro migration of the chain. The [`EraAwareEventScanner`] splits a block range at
//! the Nitro genesis block, queries each half under the topic of its era and merges the results
//! in chain order.

mod era;
pub use era::{split_range, EraEvent, EraSplit};

mod error;
pub use error::{ScannerError, ScannerResult};

mod metrics;
pub use metrics::ScannerMetrics;

mod range;
pub use range::BlockRange;

mod scanner;
pub use scanner::{DecodedEvent, EraAwareEventScanner, EventFilter};
