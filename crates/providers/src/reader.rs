use crate::{ChainReaderError, ChainReaderResult, ReadRequest};
use std::{future::IntoFuture, time::Duration};

use alloy_eips::BlockNumberOrTag;
use alloy_json_rpc::ErrorPayload;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Log, TransactionRequest};
use alloy_sol_types::SolCall;
use alloy_transport::{RpcError, TransportResult};
use bridge_primitives::{l1_block_number_from_mix_hash, BlockContext, CallRequest};

/// The default timeout applied to every request of the [`AlloyChainReader`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The outcome of a simulated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded with the provided output.
    Success(Bytes),
    /// The call reverted. Holds the JSON error object returned by the node, in whichever shape the
    /// node reports it.
    Reverted(serde_json::Value),
}

/// Read access to a parent or child chain.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait ChainReader: Send + Sync {
    /// Returns the chain id reported by the node.
    async fn chain_id(&self) -> ChainReaderResult<u64>;

    /// Simulates the call against the latest state.
    async fn call_simulate(&self, call: &CallRequest) -> ChainReaderResult<CallOutcome>;

    /// Returns the logs matching the filter.
    async fn get_logs(&self, filter: &Filter) -> ChainReaderResult<Vec<Log>>;

    /// Returns the block at the provided height, or [None] if it does not exist.
    async fn get_block(&self, number: u64) -> ChainReaderResult<Option<BlockContext>>;

    /// Returns the current head of the chain.
    async fn get_block_number(&self) -> ChainReaderResult<u64>;
}

/// Performs a read-only call to a contract and decodes its return value.
pub async fn read_contract<R, C>(reader: &R, to: Address, call: &C) -> ChainReaderResult<C::Return>
where
    R: ChainReader + ?Sized,
    C: SolCall + Sync,
{
    let request = CallRequest::new(to, call.abi_encode().into(), Default::default());
    match reader.call_simulate(&request).await? {
        CallOutcome::Success(output) => C::abi_decode_returns(&output)
            .map_err(|err| ChainReaderError::InvalidResponse(err.to_string())),
        CallOutcome::Reverted(error) => {
            Err(ChainReaderError::Reverted { to, reason: error.to_string() })
        }
    }
}

/// The [`ChainReader`] implementation backed by an alloy [`Provider`]. The provider should
/// implement some backoff strategy using [`alloy_transport::layers::RetryBackoffLayer`].
#[derive(Debug, Clone)]
pub struct AlloyChainReader<P> {
    /// An alloy provider.
    provider: P,
    /// The timeout applied to each request.
    request_timeout: Duration,
    /// Whether block headers commit to an L1 block number in their mix hash.
    nitro_headers: bool,
}

impl<P: Provider> AlloyChainReader<P> {
    /// Returns a new instance of a [`AlloyChainReader`] for a chain whose headers carry no L1
    /// block number.
    pub const fn new(provider: P) -> Self {
        Self { provider, request_timeout: DEFAULT_REQUEST_TIMEOUT, nitro_headers: false }
    }

    /// Returns a new instance of a [`AlloyChainReader`] for an Arbitrum chain, decoding the L1
    /// block number from each header.
    pub const fn nitro(provider: P) -> Self {
        Self { provider, request_timeout: DEFAULT_REQUEST_TIMEOUT, nitro_headers: true }
    }

    /// Sets the timeout applied to each request.
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Returns a reference to the inner provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Sends the request, failing with [`ChainReaderError::Timeout`] if it does not complete
    /// within the request timeout.
    pub(crate) async fn timed<F, T>(&self, request: ReadRequest, send: F) -> ChainReaderResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        tokio::time::timeout(self.request_timeout, send)
            .await
            .map_err(|_| ChainReaderError::Timeout { request, timeout: self.request_timeout })?
            .map_err(|error| ChainReaderError::rpc(request, error))
    }
}

#[async_trait::async_trait]
impl<P: Provider> ChainReader for AlloyChainReader<P> {
    async fn chain_id(&self) -> ChainReaderResult<u64> {
        self.timed(ReadRequest::ChainId, self.provider.get_chain_id()).await
    }

    async fn call_simulate(&self, call: &CallRequest) -> ChainReaderResult<CallOutcome> {
        tracing::trace!(target: "bridge::providers", to = %call.to, "simulating call");

        let mut tx = TransactionRequest::default()
            .to(call.to)
            .input(call.data.clone().into())
            .value(call.value);
        if let Some(from) = call.from {
            tx = tx.from(from);
        }

        let request = ReadRequest::Call { to: call.to };
        let result = tokio::time::timeout(self.request_timeout, self.provider.call(tx))
            .await
            .map_err(|_| ChainReaderError::Timeout { request, timeout: self.request_timeout })?;
        match result {
            Ok(output) => Ok(CallOutcome::Success(output)),
            Err(RpcError::ErrorResp(payload)) if is_revert(&payload) => {
                let error = serde_json::to_value(&payload)
                    .map_err(|err| ChainReaderError::InvalidResponse(err.to_string()))?;
                Ok(CallOutcome::Reverted(error))
            }
            Err(error) => Err(ChainReaderError::rpc(request, error)),
        }
    }

    async fn get_logs(&self, filter: &Filter) -> ChainReaderResult<Vec<Log>> {
        tracing::trace!(
            target: "bridge::providers",
            from = ?filter.get_from_block(),
            to = ?filter.get_to_block(),
            "fetching logs"
        );
        let request =
            ReadRequest::Logs { from: filter.get_from_block(), to: filter.get_to_block() };
        self.timed(request, self.provider.get_logs(filter)).await
    }

    async fn get_block(&self, number: u64) -> ChainReaderResult<Option<BlockContext>> {
        let block = self
            .timed(
                ReadRequest::Block(number),
                self.provider.get_block_by_number(BlockNumberOrTag::Number(number)),
            )
            .await?;

        Ok(block.map(|block| {
            let header = &block.header;
            let l1_block_number = if self.nitro_headers {
                l1_block_number_from_mix_hash(header.mix_hash)
            } else {
                header.number
            };
            BlockContext {
                number: header.number,
                hash: header.hash,
                timestamp: header.timestamp,
                l1_block_number,
            }
        }))
    }

    async fn get_block_number(&self) -> ChainReaderResult<u64> {
        self.timed(ReadRequest::BlockNumber, self.provider.get_block_number()).await
    }
}

/// Returns true if the error response reports a reverted execution.
fn is_revert(payload: &ErrorPayload) -> bool {
    payload.data.is_some() || payload.message.contains("revert")
}
