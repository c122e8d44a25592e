use crate::{ScannerError, ScannerResult};
use std::ops::RangeInclusive;

use alloy_eips::BlockNumberOrTag;

/// An inclusive block range whose endpoints may be tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    /// The first block of the range.
    pub from: BlockNumberOrTag,
    /// The last block of the range.
    pub to: BlockNumberOrTag,
}

impl BlockRange {
    /// Returns a new [`BlockRange`].
    pub const fn new(from: BlockNumberOrTag, to: BlockNumberOrTag) -> Self {
        Self { from, to }
    }

    /// Returns the range from `from` to the head of the chain.
    pub const fn from_block(from: u64) -> Self {
        Self::new(BlockNumberOrTag::Number(from), BlockNumberOrTag::Latest)
    }

    /// Returns true if an endpoint can only be resolved against the head of the chain.
    pub(crate) const fn needs_head(&self) -> bool {
        !(is_static(self.from) && is_static(self.to))
    }

    /// Resolves the endpoints, tags other than `earliest` resolving to `head`.
    pub(crate) fn resolve(&self, head: u64) -> ScannerResult<(u64, u64)> {
        let resolve = |tag| match tag {
            BlockNumberOrTag::Number(number) => number,
            BlockNumberOrTag::Earliest => 0,
            _ => head,
        };
        let (from, to) = (resolve(self.from), resolve(self.to));
        if from > to {
            return Err(ScannerError::InvalidRange { from, to });
        }
        Ok((from, to))
    }
}

impl From<RangeInclusive<u64>> for BlockRange {
    fn from(range: RangeInclusive<u64>) -> Self {
        Self::new((*range.start()).into(), (*range.end()).into())
    }
}

const fn is_static(tag: BlockNumberOrTag) -> bool {
    matches!(tag, BlockNumberOrTag::Number(_) | BlockNumberOrTag::Earliest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_tags_against_head() -> Result<(), ScannerError> {
        let range = BlockRange::new(BlockNumberOrTag::Earliest, BlockNumberOrTag::Safe);
        assert!(range.needs_head());
        assert_eq!(range.resolve(500)?, (0, 500));

        let range = BlockRange::from(10..=20);
        assert!(!range.needs_head());
        assert_eq!(range.resolve(0)?, (10, 20));

        Ok(())
    }

    #[test]
    fn test_should_reject_inverted_range() {
        let range = BlockRange::new(BlockNumberOrTag::Latest, BlockNumberOrTag::Number(10));
        assert!(matches!(range.resolve(50), Err(ScannerError::InvalidRange { from: 50, to: 10 })));
    }
}
