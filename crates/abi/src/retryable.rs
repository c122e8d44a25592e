use crate::abi::{calls::createRetryableTicketCall, errors::RetryableData};
use alloy_primitives::{hex, Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolError};

/// The length of the error selector prefixing a revert payload.
const SELECTOR_LENGTH: usize = 4;

/// The fully resolved parameters of a retryable ticket, as echoed by the inbox in the
/// `RetryableData` revert.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
pub struct RetryableTicketParameters {
    /// The sender of the ticket on the parent chain.
    pub from: Address,
    /// The destination of the ticket on the child chain.
    pub to: Address,
    /// The value passed along the L2 call.
    pub l2_call_value: U256,
    /// The total value deposited to the child chain.
    pub deposit: U256,
    /// The maximum fee paid for the submission of the ticket.
    pub max_submission_cost: U256,
    /// The child chain address receiving the excess fees.
    pub excess_fee_refund_address: Address,
    /// The child chain address receiving the call value if the ticket is cancelled.
    pub call_value_refund_address: Address,
    /// The gas limit of the L2 execution.
    pub gas_limit: U256,
    /// The maximum fee per gas of the L2 execution.
    pub max_fee_per_gas: U256,
    /// The L2 calldata.
    pub data: Bytes,
}

impl RetryableTicketParameters {
    /// Decodes a `RetryableData` revert payload.
    ///
    /// The leading 4 bytes are treated as the error selector and skipped, the remainder is decoded
    /// against the `RetryableData` tuple. Returns `None` if the payload does not have that
    /// layout.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        let body = payload.get(SELECTOR_LENGTH..)?;
        RetryableData::abi_decode_raw(body).ok().map(Into::into)
    }

    /// Decodes a hex encoded `RetryableData` revert payload, with or without the `0x` prefix.
    pub fn decode_hex(payload: &str) -> Option<Self> {
        let bytes = hex::decode(payload.trim()).ok()?;
        Self::decode(&bytes)
    }

    /// Returns the `RetryableData` revert payload for the parameters, selector included.
    pub fn encode(&self) -> Bytes {
        RetryableData::from(self.clone()).abi_encode().into()
    }

    /// Returns the calldata of the `Inbox.createRetryableTicket` call submitting the ticket.
    pub fn create_retryable_ticket_calldata(&self) -> Bytes {
        createRetryableTicketCall {
            to: self.to,
            l2CallValue: self.l2_call_value,
            maxSubmissionCost: self.max_submission_cost,
            excessFeeRefundAddress: self.excess_fee_refund_address,
            callValueRefundAddress: self.call_value_refund_address,
            gasLimit: self.gas_limit,
            maxFeePerGas: self.max_fee_per_gas,
            data: self.data.clone(),
        }
        .abi_encode()
        .into()
    }
}

impl From<RetryableData> for RetryableTicketParameters {
    fn from(value: RetryableData) -> Self {
        Self {
            from: value.from,
            to: value.to,
            l2_call_value: value.l2CallValue,
            deposit: value.deposit,
            max_submission_cost: value.maxSubmissionCost,
            excess_fee_refund_address: value.excessFeeRefundAddress,
            call_value_refund_address: value.callValueRefundAddress,
            gas_limit: value.gasLimit,
            max_fee_per_gas: value.maxFeePerGas,
            data: value.data,
        }
    }
}

impl From<RetryableTicketParameters> for RetryableData {
    fn from(value: RetryableTicketParameters) -> Self {
        Self {
            from: value.from,
            to: value.to,
            l2CallValue: value.l2_call_value,
            deposit: value.deposit,
            maxSubmissionCost: value.max_submission_cost,
            excessFeeRefundAddress: value.excess_fee_refund_address,
            callValueRefundAddress: value.call_value_refund_address,
            gasLimit: value.gas_limit,
            maxFeePerGas: value.max_fee_per_gas,
            data: value.data,
        }
    }
}
