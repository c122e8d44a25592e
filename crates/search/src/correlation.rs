use crate::{SearchError, SearchMetrics, SearchResult};
use std::cmp::Ordering;

use bridge_primitives::{ArbitrumNetwork, L2BlockRange};
use bridge_providers::{ChainReader, ChainReaderError};

/// The reads of a block past the first one after which it is reported as unsettled.
const MAX_SETTLE_READS: usize = 4;

/// The L2 blocks a search is restricted to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    /// The first block searched. Defaults to the Nitro genesis block.
    pub min_l2_block: Option<u64>,
    /// The last block searched. Defaults to the head of the chain.
    pub max_l2_block: Option<u64>,
}

impl SearchWindow {
    /// Returns a window over `[min, max]`.
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min_l2_block: Some(min), max_l2_block: Some(max) }
    }
}

/// Correlates the blocks of a Nitro chain with the L1 blocks they were produced under.
///
/// The L1 block number reported by L2 headers is non-decreasing, many L2 blocks sharing one L1
/// block. Nodes behind a load balancer may serve a stale header, so the blocks deciding a result
/// are only trusted once two consecutive reads agree. Both edges of a located range are settled
/// concurrently.
#[derive(Debug)]
pub struct BlockCorrelationSearch<R> {
    /// The reader of the child chain.
    reader: R,
    /// The first block carrying an L1 block number.
    nitro_genesis_block: u64,
    /// The metrics of the search.
    metrics: SearchMetrics,
}

impl<R: ChainReader> BlockCorrelationSearch<R> {
    /// Returns a new [`BlockCorrelationSearch`] over the child chain of the network.
    pub fn new(reader: R, network: &ArbitrumNetwork) -> Self {
        Self {
            reader,
            nitro_genesis_block: network.nitro_genesis_block,
            metrics: SearchMetrics::default(),
        }
    }

    /// Returns the inclusive range of L2 blocks produced under the L1 block `target`, or
    /// [`L2BlockRange::NOT_FOUND`] if no block of the window reports it.
    ///
    /// The edges of the range and the blocks right before and right after it are read until two
    /// consecutive reads agree. An edge settling on another L1 block shrinks the range and a
    /// neighbour settling on `target` extends it.
    #[tracing::instrument(target = "bridge::search", skip(self))]
    pub async fn get_block_ranges_for_l1_block(
        &self,
        target: u64,
        window: SearchWindow,
    ) -> SearchResult<L2BlockRange> {
        let (min, max) = self.resolve_window(window).await?;
        let Some(matching) = self.find_matching_block(target, min, max).await? else {
            tracing::debug!(target: "bridge::search", "no block matches the l1 block");
            return Ok(L2BlockRange::NOT_FOUND);
        };

        let first = self.lower_bound(target, min, matching).await?;
        let last = self.upper_bound(target, matching, max).await?;
        let reports_target = |l1_block_number: u64| l1_block_number == target;
        let (first, last) = tokio::try_join!(
            self.settle_first(reports_target, first, last, min),
            self.settle_last(reports_target, last, first, max),
        )?;

        match (first, last) {
            (Some(first), Some(last)) if first <= last => {
                tracing::debug!(target: "bridge::search", first, last, "located l2 blocks");
                Ok(L2BlockRange::new(first, last))
            }
            _ => {
                tracing::debug!(target: "bridge::search", "matching blocks did not settle");
                Ok(L2BlockRange::NOT_FOUND)
            }
        }
    }

    /// Returns the first L2 block of the window reporting the L1 block `target`, or the first one
    /// reporting a later L1 block if `allow_greater` is set. Returns `None` if no block
    /// qualifies.
    #[tracing::instrument(target = "bridge::search", skip(self))]
    pub async fn get_first_block_for_l1_block(
        &self,
        target: u64,
        allow_greater: bool,
        window: SearchWindow,
    ) -> SearchResult<Option<u64>> {
        if !allow_greater {
            let range = self.get_block_ranges_for_l1_block(target, window).await?;
            return Ok(range.found().map(|range| range.first));
        }

        let (min, max) = self.resolve_window(window).await?;
        if self.l1_block_number(max).await? < target {
            return Ok(None);
        }

        let first = self.lower_bound(target, min, max).await?;
        self.settle_first(|l1_block_number| l1_block_number >= target, first, max, min).await
    }

    /// Resolves the window, defaulting to the blocks from the Nitro genesis block to the head.
    async fn resolve_window(&self, window: SearchWindow) -> SearchResult<(u64, u64)> {
        let min = window.min_l2_block.unwrap_or(self.nitro_genesis_block);
        if min < self.nitro_genesis_block {
            return Err(SearchError::BeforeNitroGenesis {
                min,
                nitro_genesis_block: self.nitro_genesis_block,
            });
        }

        let max = match window.max_l2_block {
            Some(max) => max,
            None => self.reader.get_block_number().await?,
        };
        if min > max {
            return Err(SearchError::InvalidRange { min, max });
        }

        Ok((min, max))
    }

    /// Returns the L1 block number reported by the L2 block.
    async fn l1_block_number(&self, number: u64) -> SearchResult<u64> {
        self.metrics.block_probes.increment(1);
        let block =
            self.reader.get_block(number).await?.ok_or(ChainReaderError::MissingBlock(number))?;
        Ok(block.l1_block_number)
    }

    /// Binary searches `[min, max]` for any block reporting `target`.
    async fn find_matching_block(
        &self,
        target: u64,
        min: u64,
        max: u64,
    ) -> SearchResult<Option<u64>> {
        let (mut low, mut high) = (min, max);
        while low <= high {
            let mid = low + (high - low) / 2;
            match self.l1_block_number(mid).await?.cmp(&target) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater if mid == 0 => break,
                Ordering::Greater => high = mid - 1,
                Ordering::Equal => return Ok(Some(mid)),
            }
        }
        Ok(None)
    }

    /// Returns the first block of `[low, high]` reporting at least `target`. `high` must report
    /// at least `target`.
    async fn lower_bound(&self, target: u64, mut low: u64, mut high: u64) -> SearchResult<u64> {
        while low < high {
            let mid = low + (high - low) / 2;
            if self.l1_block_number(mid).await? >= target {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        Ok(high)
    }

    /// Returns the last block of `[low, high]` reporting at most `target`. `low` must report at
    /// most `target`.
    async fn upper_bound(&self, target: u64, mut low: u64, mut high: u64) -> SearchResult<u64> {
        while low < high {
            let mid = low + (high - low).div_ceil(2);
            if self.l1_block_number(mid).await? <= target {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        Ok(low)
    }

    /// Reads the L1 block number of the L2 block until two consecutive reads agree.
    async fn settled_l1_block_number(&self, number: u64) -> SearchResult<u64> {
        let mut previous = self.l1_block_number(number).await?;
        for _ in 0..MAX_SETTLE_READS {
            let current = self.l1_block_number(number).await?;
            if current == previous {
                return Ok(current);
            }
            self.record_inconsistent_read(number);
            previous = current;
        }
        Err(SearchError::UnsettledBlock { block: number, reads: MAX_SETTLE_READS + 1 })
    }

    /// Settles the first block of a range, moving it forward while it does not qualify and
    /// backward while its predecessor qualifies. Returns `None` if no block up to `last`
    /// qualifies.
    async fn settle_first(
        &self,
        qualifies: impl Fn(u64) -> bool,
        mut first: u64,
        last: u64,
        min: u64,
    ) -> SearchResult<Option<u64>> {
        loop {
            if first > last {
                return Ok(None);
            }
            if qualifies(self.settled_l1_block_number(first).await?) {
                break;
            }
            self.record_inconsistent_read(first);
            first += 1;
        }

        while first > min && qualifies(self.settled_l1_block_number(first - 1).await?) {
            self.record_inconsistent_read(first - 1);
            first -= 1;
        }
        Ok(Some(first))
    }

    /// Settles the last block of a range, moving it backward while it does not qualify and
    /// forward while its successor qualifies. Returns `None` if no block down to `first`
    /// qualifies.
    async fn settle_last(
        &self,
        qualifies: impl Fn(u64) -> bool,
        mut last: u64,
        first: u64,
        max: u64,
    ) -> SearchResult<Option<u64>> {
        loop {
            if last < first {
                return Ok(None);
            }
            if qualifies(self.settled_l1_block_number(last).await?) {
                break;
            }
            self.record_inconsistent_read(last);
            let Some(previous) = last.checked_sub(1) else { return Ok(None) };
            last = previous;
        }

        while last < max && qualifies(self.settled_l1_block_number(last + 1).await?) {
            self.record_inconsistent_read(last + 1);
            last += 1;
        }
        Ok(Some(last))
    }

    fn record_inconsistent_read(&self, block: u64) {
        self.metrics.inconsistent_reads.increment(1);
        tracing::debug!(target: "bridge::search", block, "read disagrees with the binary search");
    }
}
