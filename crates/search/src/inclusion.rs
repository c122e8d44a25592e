use crate::{SearchMetrics, SearchResult};

use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::SolCall;
use bridge_abi::abi::calls::{
    delayedInboxAccsCall, forceInclusionCall, totalDelayedMessagesReadCall,
};
use bridge_event_scanner::EraAwareEventScanner;
use bridge_primitives::{ArbitrumNetwork, BlockContext, DelayedMessageEvent};
use bridge_providers::{read_contract, ChainReader, ChainReaderError};
use serde::{Deserialize, Serialize};

/// The default size of the first window searched for delayed messages, in parent chain blocks.
pub const DEFAULT_START_SEARCH_RANGE_BLOCKS: u64 = 100;

/// The default cap of the window searched for delayed messages, in parent chain blocks.
pub const MAX_SEARCH_RANGE_BLOCKS: u64 = 3 * 6_545;

/// The default factor the window grows by when it holds no message.
pub const DEFAULT_RANGE_MULTIPLIER: u64 = 2;

/// The default block time of the parent chain, in seconds.
pub const DEFAULT_PARENT_BLOCK_TIME_SECONDS: u64 = 12;

/// The minimum step of the walk back to a block old enough to be force included.
pub const MIN_WALK_BACK_BLOCKS: u64 = 10;

/// The configuration of the [`InclusionRangeSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InclusionSearchConfig {
    /// The size of the first window searched.
    pub start_search_range_blocks: u64,
    /// The cap of the window searched.
    pub max_search_range_blocks: u64,
    /// The factor the window grows by.
    pub range_multiplier: u64,
    /// The expected block time of the parent chain, used to walk back to the time cutoff.
    pub parent_block_time_seconds: u64,
}

impl Default for InclusionSearchConfig {
    fn default() -> Self {
        Self {
            start_search_range_blocks: DEFAULT_START_SEARCH_RANGE_BLOCKS,
            max_search_range_blocks: MAX_SEARCH_RANGE_BLOCKS,
            range_multiplier: DEFAULT_RANGE_MULTIPLIER,
            parent_block_time_seconds: DEFAULT_PARENT_BLOCK_TIME_SECONDS,
        }
    }
}

/// A delayed message eligible for force inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceInclusionParams {
    /// The `MessageDelivered` event of the message.
    pub event: DelayedMessageEvent,
    /// The accumulator of the delayed inbox after the message.
    pub delayed_acc: B256,
}

impl ForceInclusionParams {
    /// Returns the calldata of the `SequencerInbox.forceInclusion` call including every delayed
    /// message up to this one.
    pub fn force_inclusion_calldata(&self) -> Bytes {
        let event = &self.event;
        forceInclusionCall {
            _totalDelayedMessagesRead: event.message_index.saturating_add(U256::from(1)),
            kind: event.kind.into(),
            l1BlockAndTime: [event.block_number, event.timestamp],
            baseFeeL1: event.base_fee_l1,
            sender: event.sender,
            messageDataHash: event.message_data_hash,
        }
        .abi_encode()
        .into()
    }
}

/// Finds the most recent delayed message of a network old enough to be force included.
#[derive(Debug)]
pub struct InclusionRangeSearch<R> {
    /// The scanner of the parent chain.
    scanner: EraAwareEventScanner<R>,
    /// The searched network.
    network: ArbitrumNetwork,
    /// The configuration of the search.
    config: InclusionSearchConfig,
    /// The metrics of the search.
    metrics: SearchMetrics,
}

impl<R: ChainReader> InclusionRangeSearch<R> {
    /// Returns a new [`InclusionRangeSearch`] over the parent chain of the network.
    pub fn new(reader: R, network: ArbitrumNetwork) -> Self {
        Self::with_config(reader, network, InclusionSearchConfig::default())
    }

    /// Returns a new [`InclusionRangeSearch`] with the provided configuration.
    pub fn with_config(
        reader: R,
        network: ArbitrumNetwork,
        config: InclusionSearchConfig,
    ) -> Self {
        Self {
            scanner: EraAwareEventScanner::new(reader),
            network,
            config,
            metrics: SearchMetrics::default(),
        }
    }

    /// Returns the most recent delayed message old enough to be force included, or `None` if
    /// there is no such message or if it was already read by the sequencer inbox.
    #[tracing::instrument(
        target = "bridge::search",
        skip_all,
        fields(chain_id = self.network.chain_id)
    )]
    pub async fn find_force_includable(&self) -> SearchResult<Option<ForceInclusionParams>> {
        let Some(upper) = self.cutoff_block().await? else {
            tracing::debug!(target: "bridge::search", "no parent block old enough");
            return Ok(None);
        };
        let Some(event) = self.latest_message_before(upper).await? else {
            tracing::debug!(target: "bridge::search", upper, "no delayed message in range");
            return Ok(None);
        };

        let bridge = &self.network.eth_bridge;
        let total_read = read_contract(
            self.reader(),
            bridge.sequencer_inbox,
            &totalDelayedMessagesReadCall {},
        )
        .await?;
        if total_read > event.message_index {
            tracing::debug!(
                target: "bridge::search",
                %total_read,
                message_index = %event.message_index,
                "delayed message already read"
            );
            return Ok(None);
        }

        let delayed_acc = read_contract(
            self.reader(),
            bridge.bridge,
            &delayedInboxAccsCall { index: event.message_index },
        )
        .await?;

        Ok(Some(ForceInclusionParams { event, delayed_acc }))
    }

    const fn reader(&self) -> &R {
        self.scanner.reader()
    }

    /// Returns the latest parent block at or below `head - max_delay_blocks` whose timestamp is
    /// below `head timestamp - max_delay_seconds`.
    async fn cutoff_block(&self) -> SearchResult<Option<u64>> {
        let head = self.block(self.reader().get_block_number().await?).await?;
        let Some(mut candidate) = head.number.checked_sub(self.network.max_delay_blocks) else {
            return Ok(None);
        };
        let Some(time_cutoff) = head.timestamp.checked_sub(self.network.max_delay_seconds) else {
            return Ok(None);
        };

        loop {
            let block = self.block(candidate).await?;
            if block.timestamp < time_cutoff {
                return Ok(Some(candidate));
            }
            if candidate == 0 {
                return Ok(None);
            }

            let diff = block.timestamp - time_cutoff;
            let step = diff
                .div_ceil(self.config.parent_block_time_seconds.max(1))
                .max(MIN_WALK_BACK_BLOCKS);
            candidate = candidate.saturating_sub(step);
        }
    }

    /// Searches growing windows ending at `upper` for delayed messages, returning the one with
    /// the greatest index. Timed out queries count as empty windows.
    async fn latest_message_before(
        &self,
        upper: u64,
    ) -> SearchResult<Option<DelayedMessageEvent>> {
        let bridge = self.network.eth_bridge.bridge;
        let max_window = self.config.max_search_range_blocks;
        let mut window = self.config.start_search_range_blocks.min(max_window);

        loop {
            let from = upper.saturating_sub(window);
            let messages = match self.scanner.fetch_delayed_messages(bridge, from, upper).await {
                Ok(messages) => messages,
                Err(err) if err.is_timeout() => {
                    tracing::debug!(target: "bridge::search", from, upper, "log query timed out");
                    Vec::new()
                }
                Err(err) => return Err(err.into()),
            };
            if let Some(latest) = messages.into_iter().max_by_key(|m| m.message_index) {
                return Ok(Some(latest));
            }

            if window >= max_window || from == 0 {
                return Ok(None);
            }
            window = window.saturating_mul(self.config.range_multiplier.max(2)).min(max_window);
            self.metrics.range_expansions.increment(1);
            tracing::trace!(target: "bridge::search", window, "widening delayed message search");
        }
    }

    async fn block(&self, number: u64) -> SearchResult<BlockContext> {
        self.metrics.block_probes.increment(1);
        let block = self.reader().get_block(number).await?;
        block.ok_or_else(|| ChainReaderError::MissingBlock(number).into())
    }
}
