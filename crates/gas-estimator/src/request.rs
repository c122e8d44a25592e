use crate::GasEstimatorConfig;
use std::{fmt::Debug, sync::Arc};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use bridge_abi::{
    abi::calls::{createRetryableTicketCall, sendTxToL1Call, withdrawEthCall},
    ARB_SYS_ADDRESS,
};
use bridge_primitives::CallRequest;

/// The gas related inputs of a retryable ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryableGasParams {
    /// The gas limit of the L2 execution.
    pub gas_limit: U256,
    /// The maximum fee per gas of the L2 execution.
    pub max_fee_per_gas: U256,
    /// The maximum fee paid for the submission of the ticket.
    pub max_submission_cost: U256,
}

impl RetryableGasParams {
    /// The reserved values making the inbox revert with the resolved ticket.
    pub const SENTINEL: Self = Self {
        gas_limit: U256::from_limbs([1, 0, 0, 0]),
        max_fee_per_gas: U256::from_limbs([1, 0, 0, 0]),
        max_submission_cost: U256::ZERO,
    };

    /// Returns the value covering the L2 execution and the submission of the ticket.
    pub fn deposit(&self) -> U256 {
        self.gas_limit.saturating_mul(self.max_fee_per_gas).saturating_add(self.max_submission_cost)
    }
}

/// Builds the parent chain call creating a retryable ticket from its gas parameters.
///
/// The builder is invoked with [`RetryableGasParams::SENTINEL`] to probe the ticket and with the
/// estimated values to produce the final call.
pub trait RetryableCallBuilder: Debug + Send + Sync {
    /// Returns the call for the provided gas parameters.
    fn build(&self, params: &RetryableGasParams) -> CallRequest;
}

/// A direct call to `Inbox.createRetryableTicket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryableTicketCall {
    /// The inbox contract.
    pub inbox: Address,
    /// The sender of the ticket.
    pub from: Address,
    /// The destination of the ticket on the child chain.
    pub to: Address,
    /// The value passed along the L2 call.
    pub l2_call_value: U256,
    /// The address receiving the excess fees.
    pub excess_fee_refund_address: Address,
    /// The address receiving the call value if the ticket is cancelled.
    pub call_value_refund_address: Address,
    /// The L2 calldata.
    pub data: Bytes,
}

impl RetryableTicketCall {
    /// Returns a ticket depositing `amount` to `to`, refunding the excess to `to`.
    pub fn eth_deposit(inbox: Address, from: Address, to: Address, amount: U256) -> Self {
        Self {
            inbox,
            from,
            to,
            l2_call_value: amount,
            excess_fee_refund_address: to,
            call_value_refund_address: to,
            data: Bytes::new(),
        }
    }
}

impl RetryableCallBuilder for RetryableTicketCall {
    fn build(&self, params: &RetryableGasParams) -> CallRequest {
        let data = createRetryableTicketCall {
            to: self.to,
            l2CallValue: self.l2_call_value,
            maxSubmissionCost: params.max_submission_cost,
            excessFeeRefundAddress: self.excess_fee_refund_address,
            callValueRefundAddress: self.call_value_refund_address,
            gasLimit: params.gas_limit,
            maxFeePerGas: params.max_fee_per_gas,
            data: self.data.clone(),
        }
        .abi_encode();
        let value = params.deposit().saturating_add(self.l2_call_value);

        CallRequest::new(self.inbox, data.into(), value).with_from(self.from)
    }
}

/// The class of the contract targeted by a retryable, deciding its gas limit floor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContractClass {
    /// A standard transfer or contract call.
    #[default]
    Standard,
    /// A custom gateway registration.
    CustomGateway,
}

impl ContractClass {
    /// Returns the gas limit floor of the class.
    pub fn min_gas_limit(&self, config: &GasEstimatorConfig) -> U256 {
        match self {
            Self::Standard => U256::from(config.min_gas_limit),
            Self::CustomGateway => U256::from(config.custom_gateway_min_gas_limit),
        }
    }
}

/// Overrides a quoted value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PercentIncrease {
    /// Replaces the quoted value. The oracle is not queried when set.
    pub base: Option<U256>,
    /// Replaces the default padding percentage.
    pub percent_increase: Option<u64>,
}

impl PercentIncrease {
    /// Returns an override replacing the quoted value, keeping the default padding.
    pub const fn base(base: U256) -> Self {
        Self { base: Some(base), percent_increase: None }
    }
}

/// Per request overrides of the quoted values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GasOverrides {
    /// The gas limit override.
    pub gas_limit: PercentIncrease,
    /// Replaces the gas limit floor of the contract class.
    pub min_gas_limit: Option<U256>,
    /// The max fee per gas override.
    pub max_fee_per_gas: PercentIncrease,
    /// The submission cost override.
    pub max_submission_cost: PercentIncrease,
}

/// A parent to child request, delivered as a retryable ticket.
#[derive(Debug, Clone)]
pub struct ParentToChildRequest {
    /// The inbox charging the submission fee.
    pub inbox: Address,
    /// The call builder.
    pub builder: Arc<dyn RetryableCallBuilder>,
    /// The class of the targeted contract.
    pub class: ContractClass,
    /// The overrides of the quoted values.
    pub overrides: GasOverrides,
}

impl ParentToChildRequest {
    /// Returns a new [`ParentToChildRequest`] for a standard contract.
    pub fn new(inbox: Address, builder: impl RetryableCallBuilder + 'static) -> Self {
        Self {
            inbox,
            builder: Arc::new(builder),
            class: ContractClass::Standard,
            overrides: GasOverrides::default(),
        }
    }

    /// Returns a request for a direct `Inbox.createRetryableTicket` call.
    pub fn retryable_ticket(call: RetryableTicketCall) -> Self {
        Self::new(call.inbox, call)
    }

    /// Sets the contract class.
    pub fn with_class(mut self, class: ContractClass) -> Self {
        self.class = class;
        self
    }

    /// Sets the overrides.
    pub fn with_overrides(mut self, overrides: GasOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// A child to parent request, sent through `ArbSys`. It needs no gas probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildToParentRequest {
    /// The sender on the child chain.
    pub from: Option<Address>,
    /// The destination on the parent chain.
    pub destination: Address,
    /// The value withdrawn.
    pub value: U256,
    /// The calldata executed on the parent chain, empty for ETH withdrawals.
    pub data: Bytes,
}

impl ChildToParentRequest {
    /// Returns a request withdrawing `amount` to `destination`.
    pub fn withdraw_eth(destination: Address, amount: U256) -> Self {
        Self { from: None, destination, value: amount, data: Bytes::new() }
    }

    /// Returns a request executing `data` on `destination`, with `value` attached.
    pub const fn send_tx_to_l1(destination: Address, data: Bytes, value: U256) -> Self {
        Self { from: None, destination, value, data }
    }

    /// Sets the sender.
    pub const fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Returns the `ArbSys` call of the request.
    pub fn call(&self) -> CallRequest {
        let data = if self.data.is_empty() {
            withdrawEthCall { destination: self.destination }.abi_encode()
        } else {
            sendTxToL1Call { destination: self.destination, data: self.data.clone() }.abi_encode()
        };
        let call = CallRequest::new(ARB_SYS_ADDRESS, data.into(), self.value);
        match self.from {
            Some(from) => call.with_from(from),
            None => call,
        }
    }
}

/// A request crossing the bridge, discriminated by its direction.
#[derive(Debug, Clone, derive_more::From)]
pub enum BridgeRequest {
    /// A retryable ticket from the parent to the child chain.
    ParentToChild(ParentToChildRequest),
    /// An outbound message from the child to the parent chain.
    ChildToParent(ChildToParentRequest),
}

impl BridgeRequest {
    /// Returns true if the request is delivered through a retryable ticket.
    pub const fn is_parent_to_child(&self) -> bool {
        matches!(self, Self::ParentToChild(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_sentinel_call_carries_reserved_values() -> eyre::Result<()> {
        // Given
        let inbox = address!("0x4Dbd4fc535Ac27206064B68FfCf827b0A60BAB3f");
        let user = address!("0xFfC9f1B7E5b2C2a62CF1D5E52d1Ea6F0F9D5d014");
        let ticket = RetryableTicketCall::eth_deposit(inbox, user, user, U256::from(1_000));

        // When
        let call = ticket.build(&RetryableGasParams::SENTINEL);

        // Then
        let decoded = createRetryableTicketCall::abi_decode(&call.data)?;
        assert_eq!(decoded.gasLimit, U256::from(1));
        assert_eq!(decoded.maxFeePerGas, U256::from(1));
        assert_eq!(decoded.maxSubmissionCost, U256::ZERO);
        assert_eq!(call.to, inbox);
        assert_eq!(call.from, Some(user));
        // the attached value covers the sentinel deposit and the call value.
        assert_eq!(call.value, U256::from(1_001));

        Ok(())
    }

    #[test]
    fn test_child_to_parent_calls() -> eyre::Result<()> {
        let destination = address!("0x10da8231ef2fd1f77106e10581a1fac14e29e125");

        let withdrawal = ChildToParentRequest::withdraw_eth(destination, U256::from(5)).call();
        assert_eq!(withdrawal.to, ARB_SYS_ADDRESS);
        assert_eq!(withdrawal.value, U256::from(5));
        assert_eq!(withdrawEthCall::abi_decode(&withdrawal.data)?.destination, destination);

        let data = Bytes::from_static(&[1, 2]);
        let message = ChildToParentRequest::send_tx_to_l1(destination, data, U256::ZERO).call();
        let decoded = sendTxToL1Call::abi_decode(&message.data)?;
        assert_eq!(decoded.data, Bytes::from_static(&[1, 2]));

        Ok(())
    }

    #[test]
    fn test_contract_class_floors() {
        let config = GasEstimatorConfig::default();
        assert_eq!(ContractClass::Standard.min_gas_limit(&config), U256::ZERO);
        assert_eq!(ContractClass::CustomGateway.min_gas_limit(&config), U256::from(275_000));
    }
}
