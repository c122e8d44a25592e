use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// The default percentage added to the quoted submission fee.
pub const DEFAULT_SUBMISSION_FEE_PERCENT_INCREASE: u64 = 300;

/// The default percentage added to the child chain gas price.
pub const DEFAULT_MAX_FEE_PER_GAS_PERCENT_INCREASE: u64 = 500;

/// The default percentage added to the estimated gas limit. The estimate is used as is.
pub const DEFAULT_GAS_LIMIT_PERCENT_INCREASE: u64 = 0;

/// The minimum gas limit of a standard retryable.
pub const DEFAULT_MIN_GAS_LIMIT: u64 = 0;

/// The minimum gas limit of a custom gateway registration.
pub const MIN_CUSTOM_GATEWAY_GAS_LIMIT: u64 = 275_000;

/// The padding policy of the [`crate::GasEstimationProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GasEstimatorConfig {
    /// The percentage added to the quoted submission fee.
    pub submission_fee_percent_increase: u64,
    /// The percentage added to the child chain gas price.
    pub max_fee_per_gas_percent_increase: u64,
    /// The percentage added to the estimated gas limit.
    pub gas_limit_percent_increase: u64,
    /// The gas limit floor of standard retryables.
    pub min_gas_limit: u64,
    /// The gas limit floor of custom gateway registrations.
    pub custom_gateway_min_gas_limit: u64,
}

impl Default for GasEstimatorConfig {
    fn default() -> Self {
        Self {
            submission_fee_percent_increase: DEFAULT_SUBMISSION_FEE_PERCENT_INCREASE,
            max_fee_per_gas_percent_increase: DEFAULT_MAX_FEE_PER_GAS_PERCENT_INCREASE,
            gas_limit_percent_increase: DEFAULT_GAS_LIMIT_PERCENT_INCREASE,
            min_gas_limit: DEFAULT_MIN_GAS_LIMIT,
            custom_gateway_min_gas_limit: MIN_CUSTOM_GATEWAY_GAS_LIMIT,
        }
    }
}

/// Returns `value` increased by `percent` percents.
pub(crate) fn percent_increase(value: U256, percent: u64) -> U256 {
    value.saturating_add(value.saturating_mul(U256::from(percent)) / U256::from(100))
}
