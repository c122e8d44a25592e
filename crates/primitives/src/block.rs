use alloy_primitives::B256;

/// The subset of a block header the bridge client reads.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockContext {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The block timestamp in seconds.
    pub timestamp: u64,
    /// The L1 block number that was canonical when the block was produced. Equal to `number` on
    /// chains that do not report one.
    pub l1_block_number: u64,
}

/// Decodes the L1 block number a Nitro L2 block header commits to.
///
/// Nitro packs `sendCount`, the L1 block number and the ArbOS version as big-endian `u64` words
/// into the first 24 bytes of the header `mixHash`.
pub fn l1_block_number_from_mix_hash(mix_hash: B256) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&mix_hash[8..16]);
    u64::from_be_bytes(word)
}

/// An inclusive range of L2 blocks.
///
/// `[0, 0]` is never a valid answer for a correlation query (the L2 genesis block does not map to
/// an L1 block) and is used as the explicit "not found" value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct L2BlockRange {
    /// The first L2 block in the range.
    pub first: u64,
    /// The last L2 block in the range.
    pub last: u64,
}

impl L2BlockRange {
    /// The "not found" sentinel.
    pub const NOT_FOUND: Self = Self { first: 0, last: 0 };

    /// Returns a new [`L2BlockRange`].
    pub const fn new(first: u64, last: u64) -> Self {
        Self { first, last }
    }

    /// Returns true if the range is not the [`L2BlockRange::NOT_FOUND`] sentinel.
    pub const fn is_found(&self) -> bool {
        !(self.first == 0 && self.last == 0)
    }

    /// Returns the range as an option, mapping the sentinel to `None`.
    pub const fn found(self) -> Option<Self> {
        if self.is_found() {
            Some(self)
        } else {
            None
        }
    }

    /// Returns the number of blocks in the range.
    pub const fn len(&self) -> u64 {
        self.last.saturating_sub(self.first) + 1
    }

    /// Returns true if the range contains no block, which only applies to the sentinel.
    pub const fn is_empty(&self) -> bool {
        !self.is_found()
    }
}

impl core::fmt::Display for L2BlockRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
