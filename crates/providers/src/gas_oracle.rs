use crate::{read_contract, AlloyChainReader, ChainReaderError, ChainReaderResult, ReadRequest};

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use bridge_abi::{
    abi::calls::{calculateRetryableSubmissionFeeCall, estimateRetryableTicketCall},
    RetryableTicketParameters, NODE_INTERFACE_ADDRESS,
};

/// The deposit on top of the call value used when simulating a ticket's L2 execution.
const ESTIMATION_DEPOSIT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Quotes the gas of retryable tickets. All values are returned without any padding.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait RetryableGasOracle: Send + Sync {
    /// Returns the child chain gas needed to execute the ticket.
    async fn estimate_retryable_gas_limit(
        &self,
        params: &RetryableTicketParameters,
    ) -> ChainReaderResult<U256>;

    /// Returns the current child chain gas price.
    async fn child_gas_price(&self) -> ChainReaderResult<U256>;

    /// Returns the submission fee charged by the inbox for a ticket carrying `data_length` bytes.
    async fn submission_fee(&self, inbox: Address, data_length: usize) -> ChainReaderResult<U256>;
}

/// The [`RetryableGasOracle`] implementation using the `NodeInterface` of the child chain and the
/// inbox of the parent chain.
#[derive(Debug, Clone)]
pub struct NodeInterfaceGasOracle<P, C> {
    /// The parent chain.
    parent: AlloyChainReader<P>,
    /// The child chain.
    child: AlloyChainReader<C>,
}

impl<P: Provider, C: Provider> NodeInterfaceGasOracle<P, C> {
    /// Returns a new [`NodeInterfaceGasOracle`].
    pub const fn new(parent: AlloyChainReader<P>, child: AlloyChainReader<C>) -> Self {
        Self { parent, child }
    }

    async fn parent_base_fee(&self) -> ChainReaderResult<U256> {
        let block = self
            .parent
            .timed(
                ReadRequest::LatestBlock,
                self.parent.provider().get_block_by_number(BlockNumberOrTag::Latest),
            )
            .await?
            .ok_or_else(|| ChainReaderError::InvalidResponse("missing latest block".into()))?;
        let number = block.header.number;
        block.header.base_fee_per_gas.map(U256::from).ok_or_else(|| {
            ChainReaderError::InvalidResponse(format!("block {number} has no base fee"))
        })
    }
}

#[async_trait::async_trait]
impl<P: Provider, C: Provider> RetryableGasOracle for NodeInterfaceGasOracle<P, C> {
    async fn estimate_retryable_gas_limit(
        &self,
        params: &RetryableTicketParameters,
    ) -> ChainReaderResult<U256> {
        let call = estimateRetryableTicketCall {
            sender: params.from,
            deposit: params.l2_call_value.saturating_add(ESTIMATION_DEPOSIT),
            to: params.to,
            l2CallValue: params.l2_call_value,
            excessFeeRefundAddress: params.excess_fee_refund_address,
            callValueRefundAddress: params.call_value_refund_address,
            data: params.data.clone(),
        };
        let tx = TransactionRequest::default()
            .to(NODE_INTERFACE_ADDRESS)
            .input(call.abi_encode().into());

        let request = ReadRequest::EstimateGas { to: NODE_INTERFACE_ADDRESS };
        let gas = self.child.timed(request, self.child.provider().estimate_gas(tx)).await?;
        tracing::trace!(
            target: "bridge::providers",
            gas,
            to = %params.to,
            "estimated retryable gas"
        );

        Ok(U256::from(gas))
    }

    async fn child_gas_price(&self) -> ChainReaderResult<U256> {
        self.child
            .timed(ReadRequest::GasPrice, self.child.provider().get_gas_price())
            .await
            .map(U256::from)
    }

    async fn submission_fee(&self, inbox: Address, data_length: usize) -> ChainReaderResult<U256> {
        let base_fee = self.parent_base_fee().await?;
        let call = calculateRetryableSubmissionFeeCall {
            dataLength: U256::from(data_length),
            baseFee: base_fee,
        };
        read_contract(&self.parent, inbox, &call).await
    }
}
