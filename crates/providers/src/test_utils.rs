//! Test utils for the chain readers.

use crate::{
    CallOutcome, ChainReader, ChainReaderError, ChainReaderResult, ReadRequest, RetryableGasOracle,
    DEFAULT_REQUEST_TIMEOUT,
};
use std::collections::{BTreeMap, HashMap, VecDeque};

use alloy_primitives::{Address, U256};
use alloy_rpc_types_eth::{Filter, Log};
use bridge_abi::RetryableTicketParameters;
use bridge_primitives::{BlockContext, CallRequest};
use parking_lot::Mutex;

/// A failure the [`MockChainReader`] can be instructed to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Returns [`ChainReaderError::Timeout`].
    Timeout,
    /// Returns [`ChainReaderError::Cancelled`].
    Cancelled,
    /// Returns [`ChainReaderError::Rpc`].
    Rpc,
}

impl MockFailure {
    /// Returns the error raised by the request.
    pub fn into_error(self, request: ReadRequest) -> ChainReaderError {
        match self {
            Self::Timeout => {
                ChainReaderError::Timeout { request, timeout: DEFAULT_REQUEST_TIMEOUT }
            }
            Self::Cancelled => ChainReaderError::Cancelled { request },
            Self::Rpc => ChainReaderError::rpc(request, alloy_transport::RpcError::NullResp),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    chain_id: u64,
    head: Option<u64>,
    blocks: BTreeMap<u64, BlockContext>,
    block_overrides: HashMap<u64, VecDeque<BlockContext>>,
    logs: Vec<Log>,
    calls: HashMap<(Address, [u8; 4]), CallOutcome>,
    log_failures: VecDeque<MockFailure>,
    block_failure: Option<MockFailure>,
    call_failure: Option<MockFailure>,
    issued_calls: Vec<CallRequest>,
    log_queries: Vec<(u64, u64)>,
    block_reads: Vec<u64>,
}

/// An in-memory implementation of the [`ChainReader`] trait.
///
/// Blocks, logs and call responses are configured upfront. Log filters are evaluated on the
/// address, topics and block range. The issued log queries and block reads are recorded.
#[derive(Debug, Default)]
pub struct MockChainReader {
    state: Mutex<MockState>,
}

impl MockChainReader {
    /// Sets the chain id reported by the reader.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.state.lock().chain_id = chain_id;
        self
    }

    /// Sets the head of the chain. Defaults to the highest known block.
    pub fn with_head(self, head: u64) -> Self {
        self.state.lock().head = Some(head);
        self
    }

    /// Adds the blocks to the chain.
    pub fn with_blocks(self, blocks: impl IntoIterator<Item = BlockContext>) -> Self {
        self.state.lock().blocks.extend(blocks.into_iter().map(|b| (b.number, b)));
        self
    }

    /// Adds the logs to the chain. Logs must carry their block number.
    pub fn with_logs(self, logs: impl IntoIterator<Item = Log>) -> Self {
        self.state.lock().logs.extend(logs);
        self
    }

    /// Sets the outcome of calls to `to` with the provided selector.
    pub fn with_call_response(self, to: Address, selector: [u8; 4], outcome: CallOutcome) -> Self {
        self.set_call_response(to, selector, outcome);
        self
    }

    /// Replaces the outcome of calls to `to` with the provided selector.
    pub fn set_call_response(&self, to: Address, selector: [u8; 4], outcome: CallOutcome) {
        self.state.lock().calls.insert((to, selector), outcome);
    }

    /// Queues a one-off read of block `number`, returned instead of the stored block on the next
    /// read. Used to emulate nodes returning inconsistent data.
    pub fn push_block_override(&self, block: BlockContext) {
        self.state.lock().block_overrides.entry(block.number).or_default().push_back(block);
    }

    /// Fails the next log queries with the provided failures, in order.
    pub fn fail_log_queries(self, failures: impl IntoIterator<Item = MockFailure>) -> Self {
        self.state.lock().log_failures.extend(failures);
        self
    }

    /// Fails every block read with the provided failure.
    pub fn fail_block_reads(self, failure: MockFailure) -> Self {
        self.state.lock().block_failure = Some(failure);
        self
    }

    /// Fails every call with the provided failure.
    pub fn fail_calls(self, failure: MockFailure) -> Self {
        self.state.lock().call_failure = Some(failure);
        self
    }

    /// Returns the calls issued to the reader.
    pub fn calls(&self) -> Vec<CallRequest> {
        self.state.lock().issued_calls.clone()
    }

    /// Returns the block ranges of the issued log queries.
    pub fn log_queries(&self) -> Vec<(u64, u64)> {
        self.state.lock().log_queries.clone()
    }

    /// Returns the block numbers read from the reader.
    pub fn block_reads(&self) -> Vec<u64> {
        self.state.lock().block_reads.clone()
    }

    fn head(state: &MockState) -> u64 {
        state.head.or_else(|| state.blocks.keys().next_back().copied()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ChainReader for MockChainReader {
    async fn chain_id(&self) -> ChainReaderResult<u64> {
        Ok(self.state.lock().chain_id)
    }

    async fn call_simulate(&self, call: &CallRequest) -> ChainReaderResult<CallOutcome> {
        let mut state = self.state.lock();
        state.issued_calls.push(call.clone());
        if let Some(failure) = state.call_failure {
            return Err(failure.into_error(ReadRequest::Call { to: call.to }));
        }

        let selector: [u8; 4] = call
            .data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| ChainReaderError::InvalidResponse("missing selector".into()))?;
        state.calls.get(&(call.to, selector)).cloned().ok_or_else(|| {
            ChainReaderError::InvalidResponse(format!("no mocked response for call to {}", call.to))
        })
    }

    async fn get_logs(&self, filter: &Filter) -> ChainReaderResult<Vec<Log>> {
        let mut state = self.state.lock();
        let head = Self::head(&state);
        let from = filter.get_from_block().unwrap_or_default();
        let to = filter.get_to_block().unwrap_or(head);
        state.log_queries.push((from, to));

        if let Some(failure) = state.log_failures.pop_front() {
            let request = ReadRequest::Logs { from: Some(from), to: Some(to) };
            return Err(failure.into_error(request));
        }

        Ok(state
            .logs
            .iter()
            .filter(|log| {
                let number = log.block_number.unwrap_or_default();
                number >= from &&
                    number <= to &&
                    filter.address.matches(&log.address()) &&
                    filter.topics.iter().enumerate().all(|(i, topic)| {
                        topic.is_empty() ||
                            log.topics().get(i).is_some_and(|value| topic.matches(value))
                    })
            })
            .cloned()
            .collect())
    }

    async fn get_block(&self, number: u64) -> ChainReaderResult<Option<BlockContext>> {
        let mut state = self.state.lock();
        state.block_reads.push(number);
        if let Some(failure) = state.block_failure {
            return Err(failure.into_error(ReadRequest::Block(number)));
        }

        if let Some(block) = state.block_overrides.get_mut(&number).and_then(VecDeque::pop_front) {
            return Ok(Some(block));
        }
        Ok(state.blocks.get(&number).copied())
    }

    async fn get_block_number(&self) -> ChainReaderResult<u64> {
        Ok(Self::head(&self.state.lock()))
    }
}

/// A [`RetryableGasOracle`] returning fixed quotes.
#[derive(Debug, Default)]
pub struct MockGasOracle {
    quote: Mutex<(U256, U256, U256)>,
    failure: Mutex<Option<MockFailure>>,
}

impl MockGasOracle {
    /// Returns a new [`MockGasOracle`] quoting the provided gas limit, gas price and submission
    /// fee.
    pub fn new(gas_limit: U256, gas_price: U256, submission_fee: U256) -> Self {
        Self {
            quote: Mutex::new((gas_limit, gas_price, submission_fee)),
            failure: Mutex::new(None),
        }
    }

    /// Updates the quoted values.
    pub fn set_quote(&self, gas_limit: U256, gas_price: U256, submission_fee: U256) {
        *self.quote.lock() = (gas_limit, gas_price, submission_fee);
    }

    /// Fails every quote with the provided failure, or clears the failure.
    pub fn set_failure(&self, failure: Option<MockFailure>) {
        *self.failure.lock() = failure;
    }

    fn check(&self, request: ReadRequest) -> ChainReaderResult<()> {
        self.failure.lock().map_or(Ok(()), |failure| Err(failure.into_error(request)))
    }
}

#[async_trait::async_trait]
impl RetryableGasOracle for MockGasOracle {
    async fn estimate_retryable_gas_limit(
        &self,
        _params: &RetryableTicketParameters,
    ) -> ChainReaderResult<U256> {
        self.check(ReadRequest::EstimateGas { to: bridge_abi::NODE_INTERFACE_ADDRESS })?;
        Ok(self.quote.lock().0)
    }

    async fn child_gas_price(&self) -> ChainReaderResult<U256> {
        self.check(ReadRequest::GasPrice)?;
        Ok(self.quote.lock().1)
    }

    async fn submission_fee(
        &self,
        inbox: Address,
        _data_length: usize,
    ) -> ChainReaderResult<U256> {
        self.check(ReadRequest::Call { to: inbox })?;
        Ok(self.quote.lock().2)
    }
}
