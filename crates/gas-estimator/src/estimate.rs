use crate::{GasEstimationProbe, ParentToChildRequest, RetryableGasParams};

use alloy_primitives::U256;
use bridge_abi::RetryableTicketParameters;
use bridge_primitives::CallRequest;
use bridge_providers::{ChainReader, RetryableGasOracle};

/// The padded gas parameters of a retryable ticket. Only produced by the
/// [`GasEstimationProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    params: RetryableGasParams,
    deposit: U256,
}

impl GasEstimate {
    pub(crate) fn new(params: RetryableGasParams) -> Self {
        Self { deposit: params.deposit(), params }
    }

    /// Returns the gas limit of the L2 execution.
    pub const fn gas_limit(&self) -> U256 {
        self.params.gas_limit
    }

    /// Returns the maximum fee per gas of the L2 execution.
    pub const fn max_fee_per_gas(&self) -> U256 {
        self.params.max_fee_per_gas
    }

    /// Returns the maximum submission cost.
    pub const fn max_submission_cost(&self) -> U256 {
        self.params.max_submission_cost
    }

    /// Returns `gas_limit * max_fee_per_gas + max_submission_cost`.
    pub const fn deposit(&self) -> U256 {
        self.deposit
    }

    /// Returns the gas parameters.
    pub const fn params(&self) -> &RetryableGasParams {
        &self.params
    }

    /// Returns true if the estimate covers the fresh one.
    fn covers(&self, fresh: &Self) -> bool {
        fresh.max_fee_per_gas() <= self.max_fee_per_gas() &&
            fresh.max_submission_cost() <= self.max_submission_cost() &&
            fresh.gas_limit() <= self.gas_limit()
    }
}

/// A retryable ticket with its committed gas estimate.
#[derive(Debug)]
pub struct EstimatedRetryable<'a, R, O> {
    probe: &'a GasEstimationProbe<R, O>,
    request: ParentToChildRequest,
    parameters: RetryableTicketParameters,
    estimate: GasEstimate,
}

impl<'a, R: ChainReader, O: RetryableGasOracle> EstimatedRetryable<'a, R, O> {
    pub(crate) const fn new(
        probe: &'a GasEstimationProbe<R, O>,
        request: ParentToChildRequest,
        parameters: RetryableTicketParameters,
        estimate: GasEstimate,
    ) -> Self {
        Self { probe, request, parameters, estimate }
    }

    /// Returns the committed estimate.
    pub const fn estimate(&self) -> &GasEstimate {
        &self.estimate
    }

    /// Returns the ticket resolved by the inbox during the probe.
    pub const fn parameters(&self) -> &RetryableTicketParameters {
        &self.parameters
    }

    /// Returns the value the parent transaction must attach: the deposit plus the L2 call value.
    pub fn total_value(&self) -> U256 {
        self.estimate.deposit().saturating_add(self.parameters.l2_call_value)
    }

    /// Returns the call creating the ticket with the committed gas parameters.
    pub fn call(&self) -> CallRequest {
        self.request.builder.build(self.estimate.params())
    }

    /// Re-estimates the ticket and returns true if the committed estimate still covers the fresh
    /// one and the resolved ticket is unchanged. Any failure invalidates the estimate.
    pub async fn is_valid(&self) -> bool {
        let valid = match self.probe.resolve(&self.request).await {
            Ok((parameters, fresh)) => {
                parameters.to == self.parameters.to &&
                    parameters.l2_call_value == self.parameters.l2_call_value &&
                    parameters.data == self.parameters.data &&
                    self.estimate.covers(&fresh)
            }
            Err(err) => {
                tracing::debug!(target: "bridge::gas", ?err, "failed to revalidate retryable");
                false
            }
        };

        if !valid {
            self.probe.metrics().revalidation_failures.increment(1);
        }
        valid
    }
}
