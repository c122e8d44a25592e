use crate::{
    config::percent_increase, BridgeRequest, EstimatedRetryable,
    GasEstimate, GasEstimationError, GasEstimationResult, GasEstimatorConfig, GasEstimatorMetrics,
    ParentToChildRequest, RetryableGasParams,
};

use alloy_primitives::{hex, Bytes};
use bridge_abi::RetryableTicketParameters;
use bridge_primitives::CallRequest;
use bridge_providers::{CallOutcome, ChainReader, RetryableGasOracle};
use serde_json::Value;

/// The fields holding the revert payload, in order of precedence.
const PAYLOAD_FIELDS: [&str; 2] = ["errorData", "data"];

/// The maximum nesting of error objects inspected for a revert payload.
const MAX_ERROR_DEPTH: usize = 4;

/// A request ready for an external signer.
#[derive(Debug)]
pub enum PreparedRequest<'a, R, O> {
    /// An estimated retryable ticket.
    Retryable(EstimatedRetryable<'a, R, O>),
    /// A call needing no estimation.
    Call(CallRequest),
}

/// Estimates the gas parameters of retryable tickets on the parent chain.
#[derive(Debug)]
pub struct GasEstimationProbe<R, O> {
    /// The parent chain reader.
    reader: R,
    /// The gas oracle.
    oracle: O,
    /// The padding policy.
    config: GasEstimatorConfig,
    /// The metrics of the probe.
    metrics: GasEstimatorMetrics,
}

impl<R: ChainReader, O: RetryableGasOracle> GasEstimationProbe<R, O> {
    /// Returns a new [`GasEstimationProbe`] with the default padding policy.
    pub fn new(reader: R, oracle: O) -> Self {
        Self::with_config(reader, oracle, GasEstimatorConfig::default())
    }

    /// Returns a new [`GasEstimationProbe`] with the provided padding policy.
    pub fn with_config(reader: R, oracle: O, config: GasEstimatorConfig) -> Self {
        Self { reader, oracle, config, metrics: GasEstimatorMetrics::default() }
    }

    /// Prepares the request: retryable tickets are estimated, outbound messages are returned as
    /// is.
    pub async fn prepare(
        &self,
        request: &BridgeRequest,
    ) -> GasEstimationResult<PreparedRequest<'_, R, O>> {
        match request {
            BridgeRequest::ParentToChild(request) => {
                self.estimate(request).await.map(PreparedRequest::Retryable)
            }
            BridgeRequest::ChildToParent(request) => Ok(PreparedRequest::Call(request.call())),
        }
    }

    /// Estimates the gas parameters of the retryable ticket created by the request.
    #[tracing::instrument(target = "bridge::gas", skip_all, fields(inbox = %request.inbox))]
    pub async fn estimate(
        &self,
        request: &ParentToChildRequest,
    ) -> GasEstimationResult<EstimatedRetryable<'_, R, O>> {
        let (parameters, estimate) = self.resolve(request).await?;
        tracing::debug!(
            target: "bridge::gas",
            gas_limit = %estimate.gas_limit(),
            max_fee_per_gas = %estimate.max_fee_per_gas(),
            max_submission_cost = %estimate.max_submission_cost(),
            "estimated retryable"
        );

        Ok(EstimatedRetryable::new(self, request.clone(), parameters, estimate))
    }

    /// Probes the ticket and quotes its gas parameters.
    pub(crate) async fn resolve(
        &self,
        request: &ParentToChildRequest,
    ) -> GasEstimationResult<(RetryableTicketParameters, GasEstimate)> {
        let parameters = self.probe(request).await?;
        let estimate = self.quote(request, &parameters).await?;
        Ok((parameters, estimate))
    }

    pub(crate) const fn metrics(&self) -> &GasEstimatorMetrics {
        &self.metrics
    }

    /// Simulates the call with the sentinel values and decodes the resolved ticket from the
    /// revert.
    async fn probe(
        &self,
        request: &ParentToChildRequest,
    ) -> GasEstimationResult<RetryableTicketParameters> {
        self.metrics.probes.increment(1);

        let call = request.builder.build(&RetryableGasParams::SENTINEL);
        let error = match self.reader.call_simulate(&call).await? {
            CallOutcome::Success(_) => {
                return Err(GasEstimationError::UnexpectedSuccess { to: call.to })
            }
            CallOutcome::Reverted(error) => error,
        };

        let payload = extract_revert_payload(&error)
            .ok_or(GasEstimationError::NoRevertData { to: call.to, error })?;
        RetryableTicketParameters::decode(&payload).ok_or_else(|| {
            self.metrics.decode_failures.increment(1);
            GasEstimationError::NotRetryableData { to: call.to, payload }
        })
    }

    /// Quotes and pads the gas parameters of the ticket.
    async fn quote(
        &self,
        request: &ParentToChildRequest,
        parameters: &RetryableTicketParameters,
    ) -> GasEstimationResult<GasEstimate> {
        let overrides = &request.overrides;

        let gas_limit = match overrides.gas_limit.base {
            Some(base) => base,
            None => self.oracle.estimate_retryable_gas_limit(parameters).await?,
        };
        let gas_limit = percent_increase(
            gas_limit,
            overrides.gas_limit.percent_increase.unwrap_or(self.config.gas_limit_percent_increase),
        );
        let min_gas_limit =
            overrides.min_gas_limit.unwrap_or_else(|| request.class.min_gas_limit(&self.config));
        let gas_limit = gas_limit.max(min_gas_limit);

        let max_fee_per_gas = match overrides.max_fee_per_gas.base {
            Some(base) => base,
            None => self.oracle.child_gas_price().await?,
        };
        let max_fee_per_gas = percent_increase(
            max_fee_per_gas,
            overrides
                .max_fee_per_gas
                .percent_increase
                .unwrap_or(self.config.max_fee_per_gas_percent_increase),
        );

        let max_submission_cost = match overrides.max_submission_cost.base {
            Some(base) => base,
            None => self.oracle.submission_fee(request.inbox, parameters.data.len()).await?,
        };
        let max_submission_cost = percent_increase(
            max_submission_cost,
            overrides
                .max_submission_cost
                .percent_increase
                .unwrap_or(self.config.submission_fee_percent_increase),
        );

        Ok(GasEstimate::new(RetryableGasParams { gas_limit, max_fee_per_gas, max_submission_cost }))
    }
}

/// Locates the revert payload in the error returned by a node.
///
/// Nodes report it under `errorData`, under `data` either as a string or as a nested object, under
/// a nested `error` object, or inside a JSON-RPC response serialized in a `body` string. Returns
/// `None` if no field holds a hex payload at least as long as a selector.
pub fn extract_revert_payload(error: &Value) -> Option<Bytes> {
    find_revert_payload(error, 0)
}

fn find_revert_payload(value: &Value, depth: usize) -> Option<Bytes> {
    if depth > MAX_ERROR_DEPTH {
        return None;
    }
    let object = value.as_object()?;

    for field in PAYLOAD_FIELDS {
        let payload = match object.get(field) {
            Some(Value::String(data)) => decode_payload(data),
            Some(nested @ Value::Object(_)) => find_revert_payload(nested, depth + 1),
            _ => None,
        };
        if payload.is_some() {
            return payload;
        }
    }

    if let Some(payload) = object.get("error").and_then(|e| find_revert_payload(e, depth + 1)) {
        return Some(payload);
    }

    let body = object.get("body").and_then(Value::as_str)?;
    let body: Value = serde_json::from_str(body).ok()?;
    find_revert_payload(&body, depth + 1)
}

fn decode_payload(data: &str) -> Option<Bytes> {
    hex::decode(data).ok().filter(|payload| payload.len() >= 4).map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAYLOAD: &str = "0x7b2c52030000";

    #[test]
    fn test_should_extract_payload_from_every_shape() {
        let expected = Some(Bytes::from(hex::decode(PAYLOAD).unwrap()));
        let body = json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": 3, "data": PAYLOAD } })
            .to_string();

        let shapes = [
            json!({ "errorData": PAYLOAD }),
            json!({ "code": 3, "message": "execution reverted", "data": PAYLOAD }),
            json!({ "data": { "data": PAYLOAD } }),
            json!({ "error": { "data": PAYLOAD } }),
            json!({ "error": { "error": { "data": PAYLOAD } } }),
            json!({ "error": { "error": { "body": body } } }),
            json!({ "body": body }),
        ];

        for shape in shapes {
            assert_eq!(extract_revert_payload(&shape), expected, "shape {shape}");
        }
    }

    #[test]
    fn test_should_not_extract_missing_payload() {
        let shapes = [
            json!({ "code": 3, "message": "execution reverted" }),
            json!({ "data": "0x" }),
            json!({ "data": "not hex" }),
            json!({ "body": "not json" }),
            json!("execution reverted"),
        ];

        for shape in shapes {
            assert_eq!(extract_revert_payload(&shape), None, "shape {shape}");
        }
    }

    #[test]
    fn test_should_prefer_error_data() {
        let error = json!({ "errorData": PAYLOAD, "data": "0x08c379a00000" });
        let payload = extract_revert_payload(&error).map(hex::encode_prefixed);
        assert_eq!(payload.as_deref(), Some(PAYLOAD));
    }
}
