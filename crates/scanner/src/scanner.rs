use crate::{split_range, BlockRange, EraEvent, ScannerMetrics, ScannerResult};

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use bridge_abi::{
    abi::logs::{decode_delayed_message, try_decode_log, ChildToParentEvent, MessageDelivered},
    ARB_SYS_ADDRESS,
};
use bridge_primitives::{network::ensure_chain_id, ArbitrumNetwork, DelayedMessageEvent};
use bridge_providers::ChainReader;

/// A decoded event along with the position of its log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent<E> {
    /// The decoded event.
    pub event: E,
    /// The emitting contract.
    pub address: Address,
    /// The block the log was emitted in.
    pub block_number: u64,
    /// The hash of the block.
    pub block_hash: Option<B256>,
    /// The hash of the emitting transaction.
    pub transaction_hash: Option<B256>,
    /// The index of the log in the block.
    pub log_index: u64,
}

impl<E> DecodedEvent<E> {
    const fn position(&self) -> (u64, u64) {
        (self.block_number, self.log_index)
    }
}

/// Restricts the logs returned by a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventFilter {
    /// The emitting contracts. Any contract matches if empty.
    pub addresses: Vec<Address>,
    /// The value of the first indexed parameter, if any.
    pub topic1: Option<B256>,
}

impl EventFilter {
    /// Returns a filter on the emitting contract.
    pub fn address(address: Address) -> Self {
        Self { addresses: vec![address], topic1: None }
    }

    /// Sets the value of the first indexed parameter.
    pub const fn with_topic1(mut self, topic1: B256) -> Self {
        self.topic1 = Some(topic1);
        self
    }

    fn to_filter(&self, signature: B256, from: u64, to: u64) -> Filter {
        let mut filter = Filter::new().event_signature(signature).from_block(from).to_block(to);
        if !self.addresses.is_empty() {
            filter = filter.address(self.addresses.clone());
        }
        if let Some(topic1) = self.topic1 {
            filter = filter.topic1(topic1);
        }
        filter
    }
}

/// The era a query targets.
#[derive(Debug, Clone, Copy)]
enum Era {
    Classic,
    Nitro,
}

/// Fetches events across the eras of an Arbitrum chain.
#[derive(Debug)]
pub struct EraAwareEventScanner<R> {
    /// The reader of the scanned chain.
    reader: R,
    /// The metrics of the scanner.
    metrics: ScannerMetrics,
}

impl<R: ChainReader> EraAwareEventScanner<R> {
    /// Returns a new [`EraAwareEventScanner`].
    pub fn new(reader: R) -> Self {
        Self { reader, metrics: ScannerMetrics::default() }
    }

    /// Returns a reference to the chain reader.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Fetches the events of type `E` emitted in the range, in ascending `(block, log index)`
    /// order.
    ///
    /// Tagged endpoints are resolved once against the head of the chain. The range is then split
    /// at the Nitro genesis block of the network and both halves are queried concurrently under
    /// the topic of their era.
    #[tracing::instrument(
        target = "bridge::scanner",
        skip_all,
        fields(chain_id = network.chain_id)
    )]
    pub async fn fetch_events<E: EraEvent>(
        &self,
        network: &ArbitrumNetwork,
        filter: &EventFilter,
        range: BlockRange,
    ) -> ScannerResult<Vec<DecodedEvent<E>>> {
        let head = if range.needs_head() { self.reader.get_block_number().await? } else { 0 };
        let (from, to) = range.resolve(head)?;
        let split = split_range(from, to, network.nitro_genesis_block);
        tracing::trace!(target: "bridge::scanner", from, to, ?split, "scanning events");

        let classic = async {
            match split.classic {
                Some((from, to)) => {
                    self.query::<E::Classic, E>(filter, Era::Classic, from, to, E::from_classic)
                        .await
                }
                None => Ok(Vec::new()),
            }
        };
        let nitro = async {
            match split.nitro {
                Some((from, to)) => {
                    self.query::<E::Nitro, E>(filter, Era::Nitro, from, to, E::from_nitro).await
                }
                None => Ok(Vec::new()),
            }
        };
        let (mut events, nitro) = tokio::try_join!(classic, nitro)?;

        events.extend(nitro);
        events.sort_by_key(DecodedEvent::position);
        events.dedup_by_key(|event| event.position());
        self.metrics.events.increment(events.len() as u64);

        Ok(events)
    }

    /// Fetches the events after checking the reader serves the network.
    pub async fn fetch_events_for_reader<E: EraEvent>(
        &self,
        network: &ArbitrumNetwork,
        filter: &EventFilter,
        range: BlockRange,
    ) -> ScannerResult<Vec<DecodedEvent<E>>> {
        let chain_id = self.reader.chain_id().await?;
        ensure_chain_id(network.chain_id, chain_id)?;
        self.fetch_events(network, filter, range).await
    }

    /// Fetches the L2 to L1 messages sent through `ArbSys`, optionally restricted to a
    /// destination.
    pub async fn fetch_child_to_parent_events(
        &self,
        network: &ArbitrumNetwork,
        destination: Option<Address>,
        range: BlockRange,
    ) -> ScannerResult<Vec<DecodedEvent<ChildToParentEvent>>> {
        let mut filter = EventFilter::address(ARB_SYS_ADDRESS);
        if let Some(destination) = destination {
            filter = filter.with_topic1(destination.into_word());
        }
        self.fetch_events_for_reader(network, &filter, range).await
    }

    /// Fetches the messages delivered to the delayed inbox of the bridge in the inclusive range,
    /// ordered by message index. The bridge lives on the parent chain, which has a single era.
    pub async fn fetch_delayed_messages(
        &self,
        bridge: Address,
        from: u64,
        to: u64,
    ) -> ScannerResult<Vec<DelayedMessageEvent>> {
        let filter =
            EventFilter::address(bridge).to_filter(MessageDelivered::SIGNATURE_HASH, from, to);
        let logs = self.reader.get_logs(&filter).await?;

        let mut messages: Vec<_> = logs
            .iter()
            .filter_map(|log| {
                let message = decode_delayed_message(log);
                if message.is_none() {
                    self.skip(log);
                }
                message
            })
            .collect();
        messages.sort();
        messages.dedup();

        Ok(messages)
    }

    async fn query<T: SolEvent, E>(
        &self,
        filter: &EventFilter,
        era: Era,
        from: u64,
        to: u64,
        convert: fn(T) -> E,
    ) -> ScannerResult<Vec<DecodedEvent<E>>> {
        match era {
            Era::Classic => self.metrics.classic_queries.increment(1),
            Era::Nitro => self.metrics.nitro_queries.increment(1),
        }
        let logs = self.reader.get_logs(&filter.to_filter(T::SIGNATURE_HASH, from, to)).await?;
        tracing::trace!(
            target: "bridge::scanner",
            ?era,
            from,
            to,
            count = logs.len(),
            "fetched logs"
        );

        Ok(logs
            .iter()
            .filter_map(|log| {
                let event = decode(log, convert);
                if event.is_none() {
                    self.skip(log);
                }
                event
            })
            .collect())
    }

    fn skip(&self, log: &Log) {
        self.metrics.skipped_logs.increment(1);
        tracing::warn!(
            target: "bridge::scanner",
            block_number = ?log.block_number,
            log_index = ?log.log_index,
            "skipping undecodable log"
        );
    }
}

fn decode<T: SolEvent, E>(log: &Log, convert: fn(T) -> E) -> Option<DecodedEvent<E>> {
    let event = try_decode_log::<T>(&log.inner)?;
    Some(DecodedEvent {
        event: convert(event.data),
        address: event.address,
        block_number: log.block_number?,
        block_hash: log.block_hash,
        transaction_hash: log.transaction_hash,
        log_index: log.log_index?,
    })
}
