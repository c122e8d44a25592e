//! Integration tests of the block correlation search.

use alloy_primitives::B256;
use bridge_primitives::{ArbitrumNetwork, BlockContext, L2BlockRange};
use bridge_providers::test_utils::MockChainReader;
use bridge_search::{BlockCorrelationSearch, SearchError, SearchWindow};

const NITRO_GENESIS: u64 = 100;

/// Five L2 blocks per L1 block, the L2 chain only observing even L1 blocks from 1000 on.
const fn l1_block_number(number: u64) -> u64 {
    1_000 + 2 * ((number - NITRO_GENESIS) / 5)
}

fn block(number: u64, l1_block_number: u64) -> BlockContext {
    BlockContext { number, hash: B256::with_last_byte(number as u8), timestamp: 0, l1_block_number }
}

fn network() -> ArbitrumNetwork {
    ArbitrumNetwork { nitro_genesis_block: NITRO_GENESIS, ..ArbitrumNetwork::arbitrum_one() }
}

fn reader() -> MockChainReader {
    MockChainReader::default()
        .with_blocks((NITRO_GENESIS..=200).map(|number| block(number, l1_block_number(number))))
}

#[tokio::test]
async fn test_should_locate_block_range() -> eyre::Result<()> {
    // Given
    let reader = reader();
    let search = BlockCorrelationSearch::new(&reader, &network());

    // When
    let range = search.get_block_ranges_for_l1_block(1_004, SearchWindow::default()).await?;

    // Then
    assert_eq!(range, L2BlockRange::new(110, 114));
    // the blocks outside the range were read.
    let reads = reader.block_reads();
    assert!(reads.contains(&109));
    assert!(reads.contains(&115));

    Ok(())
}

#[tokio::test]
async fn test_should_locate_range_at_window_edges() -> eyre::Result<()> {
    let reader = reader();
    let search = BlockCorrelationSearch::new(&reader, &network());

    let first = search.get_block_ranges_for_l1_block(1_000, SearchWindow::default()).await?;
    let last = search.get_block_ranges_for_l1_block(1_040, SearchWindow::default()).await?;
    let clipped = search.get_block_ranges_for_l1_block(1_004, SearchWindow::new(112, 130)).await?;

    assert_eq!(first, L2BlockRange::new(100, 104));
    assert_eq!(last, L2BlockRange::new(200, 200));
    assert_eq!(clipped, L2BlockRange::new(112, 114));

    Ok(())
}

#[tokio::test]
async fn test_should_settle_stale_boundary_reads() -> eyre::Result<()> {
    // Given
    let reader = reader();
    // a lagging node serves blocks 109 and 115 with L1 block 1_004 once.
    reader.push_block_override(block(115, 1_004));
    reader.push_block_override(block(109, 1_004));
    let search = BlockCorrelationSearch::new(&reader, &network());

    // When
    let range = search.get_block_ranges_for_l1_block(1_004, SearchWindow::default()).await?;

    // Then
    assert_eq!(range, L2BlockRange::new(110, 114));
    assert!(reader.block_reads().iter().filter(|&&n| n == 115).count() >= 2);
    assert!(reader.block_reads().iter().filter(|&&n| n == 109).count() >= 2);

    Ok(())
}

#[tokio::test]
async fn test_should_fail_on_block_that_never_settles() -> eyre::Result<()> {
    // Given
    let reader = reader();
    // block 115 flips between two L1 blocks on every read.
    for l1_block_number in [1_004, 1_006].repeat(8) {
        reader.push_block_override(block(115, l1_block_number));
    }
    let search = BlockCorrelationSearch::new(&reader, &network());

    // When
    let result = search.get_block_ranges_for_l1_block(1_004, SearchWindow::default()).await;

    // Then
    assert!(matches!(result, Err(SearchError::UnsettledBlock { block: 115, reads: 5 })));

    Ok(())
}

#[tokio::test]
async fn test_should_return_sentinel_for_gap() -> eyre::Result<()> {
    let reader = reader();
    let search = BlockCorrelationSearch::new(&reader, &network());

    let range = search.get_block_ranges_for_l1_block(1_005, SearchWindow::default()).await?;
    let beyond = search.get_block_ranges_for_l1_block(5_000, SearchWindow::default()).await?;

    assert_eq!(range, L2BlockRange::NOT_FOUND);
    assert!(!beyond.is_found());

    Ok(())
}

#[tokio::test]
async fn test_should_find_first_block_for_l1_block() -> eyre::Result<()> {
    // Given
    let reader = reader();
    let search = BlockCorrelationSearch::new(&reader, &network());
    let window = SearchWindow::default();

    // When
    let exact = search.get_first_block_for_l1_block(1_004, false, window).await?;
    let gap = search.get_first_block_for_l1_block(1_005, false, window).await?;
    let greater = search.get_first_block_for_l1_block(1_005, true, window).await?;
    let before = search.get_first_block_for_l1_block(900, true, window).await?;
    let after = search.get_first_block_for_l1_block(1_041, true, window).await?;

    // Then
    assert_eq!(exact, Some(110));
    assert_eq!(gap, None);
    assert_eq!(greater, Some(115));
    assert_eq!(before, Some(NITRO_GENESIS));
    assert_eq!(after, None);

    Ok(())
}

#[tokio::test]
async fn test_should_reject_invalid_windows() {
    let reader = reader();
    let search = BlockCorrelationSearch::new(&reader, &network());

    let below_genesis =
        search.get_block_ranges_for_l1_block(1_000, SearchWindow::new(50, 150)).await;
    let inverted = search.get_block_ranges_for_l1_block(1_000, SearchWindow::new(150, 120)).await;

    assert!(matches!(
        below_genesis,
        Err(SearchError::BeforeNitroGenesis { min: 50, nitro_genesis_block: NITRO_GENESIS })
    ));
    assert!(matches!(inverted, Err(SearchError::InvalidRange { min: 150, max: 120 })));
    assert!(reader.block_reads().is_empty());
}

#[tokio::test]
async fn test_should_fail_on_missing_block() {
    let reader = MockChainReader::default().with_head(150);
    let search = BlockCorrelationSearch::new(&reader, &network());

    let result = search.get_block_ranges_for_l1_block(1_000, SearchWindow::default()).await;

    assert!(matches!(result, Err(SearchError::Provider(_))));
}
