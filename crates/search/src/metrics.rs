use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::BlockCorrelationSearch`] and the [`super::InclusionRangeSearch`].
#[derive(Metrics, Clone)]
#[metrics(scope = "search")]
pub struct SearchMetrics {
    /// A counter on the blocks read.
    pub block_probes: Counter,
    /// A counter on the widenings of the inclusion search window.
    pub range_expansions: Counter,
    /// A counter on the boundary neighbours found to report the target L1 block.
    pub inconsistent_reads: Counter,
}
