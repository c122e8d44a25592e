use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::GasEstimationProbe`].
#[derive(Metrics, Clone)]
#[metrics(scope = "gas_estimator")]
pub struct GasEstimatorMetrics {
    /// A counter on the sentinel calls simulated.
    pub probes: Counter,
    /// A counter on the revert payloads that failed to decode as retryable data.
    pub decode_failures: Counter,
    /// A counter on the estimates that failed revalidation.
    pub revalidation_failures: Counter,
}
