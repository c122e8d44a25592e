//! Integration tests of the era aware event scanner.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{address, Address, Bytes, Log as PrimitiveLog, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;
use bridge_abi::{
    abi::logs::{ChildToParentEvent, L2ToL1Transaction, L2ToL1Tx, MessageDelivered},
    ARB_SYS_ADDRESS,
};
use bridge_event_scanner::{
    BlockRange, DecodedEvent, EraAwareEventScanner, EventFilter, ScannerError,
};
use bridge_primitives::{ArbitrumNetwork, RegistryError};
use bridge_providers::{
    test_utils::{MockChainReader, MockFailure},
    ReadRequest,
};

const NITRO_GENESIS: u64 = 100;
const DESTINATION: Address = address!("0x10da8231ef2fd1f77106e10581a1fac14e29e125");
const BRIDGE: Address = address!("0x8315177aB297bA92A06054cE80a67Ed4DBd7ed3a");

fn network(nitro_genesis_block: u64) -> ArbitrumNetwork {
    ArbitrumNetwork { nitro_genesis_block, ..ArbitrumNetwork::arbitrum_one() }
}

fn log<E: SolEvent>(event: &E, address: Address, block: u64, log_index: u64) -> Log {
    Log {
        inner: PrimitiveLog { address, data: event.encode_log_data() },
        block_number: Some(block),
        block_hash: Some(B256::with_last_byte(block as u8)),
        log_index: Some(log_index),
        ..Default::default()
    }
}

fn classic(block: u64, log_index: u64, destination: Address) -> Log {
    let event = L2ToL1Transaction {
        caller: Address::repeat_byte(0xaa),
        destination,
        uniqueId: U256::from(block),
        batchNumber: U256::from(1),
        indexInBatch: U256::from(log_index),
        arbBlockNum: U256::from(block),
        ethBlockNum: U256::from(block * 10),
        timestamp: U256::from(1_600_000_000 + block),
        callvalue: U256::from(1),
        data: Bytes::new(),
    };
    log(&event, ARB_SYS_ADDRESS, block, log_index)
}

fn nitro(block: u64, log_index: u64, destination: Address) -> Log {
    let event = L2ToL1Tx {
        caller: Address::repeat_byte(0xaa),
        destination,
        hash: U256::from(block),
        position: U256::from(block),
        arbBlockNum: U256::from(block),
        ethBlockNum: U256::from(block * 10),
        timestamp: U256::from(1_700_000_000 + block),
        callvalue: U256::from(1),
        data: Bytes::from_static(&[0x01]),
    };
    log(&event, ARB_SYS_ADDRESS, block, log_index)
}

fn reader(logs: impl IntoIterator<Item = Log>) -> MockChainReader {
    MockChainReader::default()
        .with_chain_id(ArbitrumNetwork::arbitrum_one().chain_id)
        .with_head(200)
        .with_logs(logs)
}

fn positions<E>(events: &[DecodedEvent<E>]) -> Vec<(u64, u64)> {
    events.iter().map(|e| (e.block_number, e.log_index)).collect()
}

#[tokio::test]
async fn test_should_only_query_classic_below_genesis() -> eyre::Result<()> {
    // Given
    let reader = reader([classic(10, 0, DESTINATION), classic(50, 1, DESTINATION)]);
    let scanner = EraAwareEventScanner::new(&reader);

    // When
    let events = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(NITRO_GENESIS),
            &EventFilter::address(ARB_SYS_ADDRESS),
            BlockRange::from(0..=60),
        )
        .await?;

    // Then
    assert_eq!(reader.log_queries(), vec![(0, 60)]);
    assert_eq!(positions(&events), vec![(10, 0), (50, 1)]);
    assert!(events.iter().all(|e| e.event.is_classic()));

    Ok(())
}

#[tokio::test]
async fn test_should_only_query_nitro_above_genesis() -> eyre::Result<()> {
    let reader = reader([nitro(150, 0, DESTINATION)]);
    let scanner = EraAwareEventScanner::new(&reader);

    let events = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(NITRO_GENESIS),
            &EventFilter::address(ARB_SYS_ADDRESS),
            BlockRange::from(NITRO_GENESIS..=160),
        )
        .await?;

    assert_eq!(reader.log_queries(), vec![(NITRO_GENESIS, 160)]);
    assert_eq!(events.len(), 1);
    assert!(!events[0].event.is_classic());

    Ok(())
}

#[tokio::test]
async fn test_should_merge_straddling_range() -> eyre::Result<()> {
    // Given
    let reader = reader([
        nitro(105, 2, DESTINATION),
        classic(99, 3, DESTINATION),
        nitro(100, 0, DESTINATION),
        classic(90, 1, DESTINATION),
        // a duplicated log returned by the node.
        classic(90, 1, DESTINATION),
        // logs in the wrong era for their block are not matched.
        nitro(95, 0, DESTINATION),
        classic(101, 0, DESTINATION),
    ]);
    let scanner = EraAwareEventScanner::new(&reader);

    // When
    let events = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(NITRO_GENESIS),
            &EventFilter::address(ARB_SYS_ADDRESS),
            BlockRange::from(90..=110),
        )
        .await?;

    // Then
    let mut queries = reader.log_queries();
    queries.sort_unstable();
    assert_eq!(queries, vec![(90, 99), (100, 110)]);
    assert_eq!(positions(&events), vec![(90, 1), (99, 3), (100, 0), (105, 2)]);
    assert!(events[1].event.is_classic());
    assert!(!events[2].event.is_classic());
    assert_eq!(events[2].event.position(), U256::from(100));

    Ok(())
}

#[tokio::test]
async fn test_should_skip_classic_on_nitro_born_chain() -> eyre::Result<()> {
    let reader = reader([nitro(3, 0, DESTINATION)]);
    let scanner = EraAwareEventScanner::new(&reader);

    let events = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(0),
            &EventFilter::address(ARB_SYS_ADDRESS),
            BlockRange::from(0..=10),
        )
        .await?;

    assert_eq!(reader.log_queries(), vec![(0, 10)]);
    assert_eq!(events.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_should_resolve_latest_before_splitting() -> eyre::Result<()> {
    let reader = reader([classic(96, 0, DESTINATION), nitro(199, 0, DESTINATION)]);
    let scanner = EraAwareEventScanner::new(&reader);

    let events = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(NITRO_GENESIS),
            &EventFilter::default(),
            BlockRange::new(BlockNumberOrTag::Number(95), BlockNumberOrTag::Latest),
        )
        .await?;

    let mut queries = reader.log_queries();
    queries.sort_unstable();
    assert_eq!(queries, vec![(95, 99), (100, 200)]);
    assert_eq!(positions(&events), vec![(96, 0), (199, 0)]);

    Ok(())
}

#[tokio::test]
async fn test_should_filter_child_to_parent_events_by_destination() -> eyre::Result<()> {
    let other = Address::repeat_byte(0x42);
    let reader = reader([
        classic(50, 0, DESTINATION),
        classic(51, 0, other),
        nitro(150, 0, other),
        nitro(151, 0, DESTINATION),
    ]);
    let scanner = EraAwareEventScanner::new(&reader);

    let events = scanner
        .fetch_child_to_parent_events(
            &network(NITRO_GENESIS),
            Some(DESTINATION),
            BlockRange::from(0..=200),
        )
        .await?;

    assert_eq!(positions(&events), vec![(50, 0), (151, 0)]);
    assert!(events.iter().all(|e| e.event.destination() == DESTINATION));

    Ok(())
}

#[tokio::test]
async fn test_should_reject_reader_of_another_network() {
    let reader = MockChainReader::default().with_chain_id(1);
    let scanner = EraAwareEventScanner::new(&reader);

    let result =
        scanner.fetch_child_to_parent_events(&network(0), None, BlockRange::from(0..=10)).await;

    assert!(matches!(
        result,
        Err(ScannerError::Network(RegistryError::NetworkMismatch { expected: 42161, actual: 1 }))
    ));
    assert!(reader.log_queries().is_empty());
}

#[tokio::test]
async fn test_should_surface_cancellation() {
    let reader = MockChainReader::default().fail_log_queries([MockFailure::Cancelled]);
    let scanner = EraAwareEventScanner::new(&reader);

    let result = scanner
        .fetch_events::<ChildToParentEvent>(
            &network(0),
            &EventFilter::default(),
            BlockRange::from(0..=10),
        )
        .await;

    assert!(matches!(
        result,
        Err(ScannerError::Cancelled { request: ReadRequest::Logs { from: Some(0), to: Some(10) } })
    ));
}

#[tokio::test]
async fn test_should_fetch_delayed_messages_by_index() -> eyre::Result<()> {
    // Given
    let message = |index: u64, block: u64, log_index: u64| {
        let event = MessageDelivered {
            messageIndex: U256::from(index),
            beforeInboxAcc: B256::repeat_byte(index as u8),
            inbox: Address::repeat_byte(0x11),
            kind: 12,
            sender: Address::repeat_byte(0x22),
            messageDataHash: B256::repeat_byte(0x33),
            baseFeeL1: U256::from(7),
            timestamp: 1_700_000_000 + block,
        };
        log(&event, BRIDGE, block, log_index)
    };
    let reader =
        reader([message(8, 20, 1), message(7, 20, 0), message(9, 30, 0), message(6, 5, 0)]);
    let scanner = EraAwareEventScanner::new(&reader);

    // When
    let messages = scanner.fetch_delayed_messages(BRIDGE, 10, 40).await?;

    // Then
    let indexes: Vec<_> = messages.iter().map(|m| m.message_index.to::<u64>()).collect();
    assert_eq!(indexes, vec![7, 8, 9]);
    assert_eq!(messages[0].block_number, 20);
    assert_eq!(reader.log_queries(), vec![(10, 40)]);

    Ok(())
}
