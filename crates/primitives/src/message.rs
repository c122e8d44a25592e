use alloy_primitives::{Address, B256, U256};

/// The kind of a message delivered to the delayed inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum InboxMessageKind {
    /// A signed or unsigned L2 transaction.
    L2Message,
    /// An end of block marker.
    EndOfBlock,
    /// An L2 transaction funded by an L1 deposit.
    L2FundedByL1,
    /// A rollup protocol event.
    RollupEvent,
    /// A retryable ticket submission.
    SubmitRetryable,
    /// A batch used for gas estimation.
    BatchForGasEstimation,
    /// The chain initialization message.
    Initialize,
    /// A plain ETH deposit.
    EthDeposit,
    /// A batch posting report.
    BatchPostingReport,
    /// Any other kind value.
    Unknown(u8),
}

impl From<u8> for InboxMessageKind {
    fn from(value: u8) -> Self {
        match value {
            3 => Self::L2Message,
            6 => Self::EndOfBlock,
            7 => Self::L2FundedByL1,
            8 => Self::RollupEvent,
            9 => Self::SubmitRetryable,
            10 => Self::BatchForGasEstimation,
            11 => Self::Initialize,
            12 => Self::EthDeposit,
            13 => Self::BatchPostingReport,
            other => Self::Unknown(other),
        }
    }
}

impl From<InboxMessageKind> for u8 {
    fn from(value: InboxMessageKind) -> Self {
        match value {
            InboxMessageKind::L2Message => 3,
            InboxMessageKind::EndOfBlock => 6,
            InboxMessageKind::L2FundedByL1 => 7,
            InboxMessageKind::RollupEvent => 8,
            InboxMessageKind::SubmitRetryable => 9,
            InboxMessageKind::BatchForGasEstimation => 10,
            InboxMessageKind::Initialize => 11,
            InboxMessageKind::EthDeposit => 12,
            InboxMessageKind::BatchPostingReport => 13,
            InboxMessageKind::Unknown(other) => other,
        }
    }
}

/// A message delivered to the delayed inbox of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct DelayedMessageEvent {
    /// The index of the message in the delayed inbox.
    pub message_index: U256,
    /// The sender of the message, as recorded by the bridge.
    pub sender: Address,
    /// The inbox contract that delivered the message.
    pub inbox: Address,
    /// The hash of the message data.
    pub message_data_hash: B256,
    /// The L1 base fee at delivery.
    pub base_fee_l1: U256,
    /// The L1 timestamp recorded by the bridge.
    pub timestamp: u64,
    /// The L1 block the message was delivered in.
    pub block_number: u64,
    /// The hash of the L1 block the message was delivered in.
    pub block_hash: B256,
    /// The message kind.
    pub kind: InboxMessageKind,
}

impl PartialOrd for DelayedMessageEvent {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DelayedMessageEvent {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.message_index
            .cmp(&other.message_index)
            .then_with(|| self.block_number.cmp(&other.block_number))
            .then_with(|| self.block_hash.cmp(&other.block_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_u8() {
        for value in 0..=u8::MAX {
            assert_eq!(u8::from(InboxMessageKind::from(value)), value);
        }
        assert_eq!(InboxMessageKind::from(9), InboxMessageKind::SubmitRetryable);
    }

    #[test]
    fn test_events_are_ordered_by_message_index() {
        let event = |index: u64, block_number: u64| DelayedMessageEvent {
            message_index: U256::from(index),
            sender: Address::ZERO,
            inbox: Address::ZERO,
            message_data_hash: B256::ZERO,
            base_fee_l1: U256::ZERO,
            timestamp: 0,
            block_number,
            block_hash: B256::ZERO,
            kind: InboxMessageKind::EthDeposit,
        };

        let mut events = vec![event(5, 10), event(2, 12), event(9, 1)];
        events.sort();

        let indexes: Vec<_> = events.iter().map(|e| e.message_index.to::<u64>()).collect();
        assert_eq!(indexes, vec![2, 5, 9]);
    }
}
