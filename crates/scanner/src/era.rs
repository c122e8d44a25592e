use alloy_sol_types::SolEvent;
use bridge_abi::abi::logs::{ChildToParentEvent, L2ToL1Transaction, L2ToL1Tx};

/// A logical event emitted under a different schema before and after the Nitro migration.
pub trait EraEvent: Sized + Send {
    /// The event emitted before the Nitro genesis block.
    type Classic: SolEvent + Send;
    /// The event emitted from the Nitro genesis block on.
    type Nitro: SolEvent + Send;

    /// Converts a classic event.
    fn from_classic(event: Self::Classic) -> Self;

    /// Converts a nitro event.
    fn from_nitro(event: Self::Nitro) -> Self;
}

impl EraEvent for ChildToParentEvent {
    type Classic = L2ToL1Transaction;
    type Nitro = L2ToL1Tx;

    fn from_classic(event: <Self as EraEvent>::Classic) -> Self {
        Self::Classic(event)
    }

    fn from_nitro(event: <Self as EraEvent>::Nitro) -> Self {
        Self::Nitro(event)
    }
}

/// The inclusive sub-ranges of a block range falling in each era.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EraSplit {
    /// The blocks before the Nitro genesis block.
    pub classic: Option<(u64, u64)>,
    /// The blocks from the Nitro genesis block on.
    pub nitro: Option<(u64, u64)>,
}

/// Splits the inclusive range `[from, to]` at the Nitro genesis block. Empty halves are `None`,
/// and a boundary of zero leaves no classic half.
pub fn split_range(from: u64, to: u64, nitro_genesis_block: u64) -> EraSplit {
    let classic = (nitro_genesis_block > 0 && from < nitro_genesis_block)
        .then(|| (from, to.min(nitro_genesis_block - 1)))
        .filter(|(from, to)| from <= to);
    let nitro = Some((from.max(nitro_genesis_block), to)).filter(|(from, to)| from <= to);

    EraSplit { classic, nitro }
}
