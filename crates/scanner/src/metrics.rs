use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::EraAwareEventScanner`].
#[derive(Metrics, Clone)]
#[metrics(scope = "event_scanner")]
pub struct ScannerMetrics {
    /// A counter on the log queries issued under the classic topics.
    pub classic_queries: Counter,
    /// A counter on the log queries issued under the nitro topics.
    pub nitro_queries: Counter,
    /// A counter on the events returned.
    pub events: Counter,
    /// A counter on the logs skipped because they could not be decoded.
    pub skipped_logs: Counter,
}
