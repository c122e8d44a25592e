use alloy_primitives::{Address, Bytes, Log, U256};
use alloy_sol_types::{sol, SolEvent};
use bridge_primitives::{DelayedMessageEvent, InboxMessageKind};

sol! {
    // *********************BRIDGE*********************
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    event MessageDelivered(
        uint256 indexed messageIndex,
        bytes32 indexed beforeInboxAcc,
        address inbox,
        uint8 kind,
        address sender,
        bytes32 messageDataHash,
        uint256 baseFeeL1,
        uint64 timestamp
    );

    // *********************ARBSYS*********************
    /// The outbound message event emitted before the Nitro migration.
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    event L2ToL1Transaction(
        address caller,
        address indexed destination,
        uint256 indexed uniqueId,
        uint256 indexed batchNumber,
        uint256 indexInBatch,
        uint256 arbBlockNum,
        uint256 ethBlockNum,
        uint256 timestamp,
        uint256 callvalue,
        bytes data
    );

    /// The outbound message event emitted since the Nitro migration.
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    event L2ToL1Tx(
        address caller,
        address indexed destination,
        uint256 indexed hash,
        uint256 indexed position,
        uint256 arbBlockNum,
        uint256 ethBlockNum,
        uint256 timestamp,
        uint256 callvalue,
        bytes data
    );
}

/// Tries to decode the provided log into the type T.
pub fn try_decode_log<T: SolEvent>(log: &Log) -> Option<Log<T>> {
    T::decode_log(log).ok()
}

/// Decodes a `MessageDelivered` log into a [`DelayedMessageEvent`]. Returns `None` if the log is
/// not a `MessageDelivered` event or is missing its block information.
pub fn decode_delayed_message(log: &alloy_rpc_types_eth::Log) -> Option<DelayedMessageEvent> {
    let event = try_decode_log::<MessageDelivered>(&log.inner)?.data;
    Some(DelayedMessageEvent {
        message_index: event.messageIndex,
        sender: event.sender,
        inbox: event.inbox,
        message_data_hash: event.messageDataHash,
        base_fee_l1: event.baseFeeL1,
        timestamp: event.timestamp,
        block_number: log.block_number?,
        block_hash: log.block_hash?,
        kind: InboxMessageKind::from(event.kind),
    })
}

/// An L2 to L1 message, in the schema of the era it was emitted in.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ChildToParentEvent {
    /// An event emitted before the Nitro migration.
    Classic(L2ToL1Transaction),
    /// An event emitted since the Nitro migration.
    Nitro(L2ToL1Tx),
}

impl ChildToParentEvent {
    /// Returns true if the event uses the classic schema.
    pub const fn is_classic(&self) -> bool {
        matches!(self, Self::Classic(_))
    }

    /// Returns the L2 sender of the message.
    pub const fn caller(&self) -> Address {
        match self {
            Self::Classic(e) => e.caller,
            Self::Nitro(e) => e.caller,
        }
    }

    /// Returns the L1 destination of the message.
    pub const fn destination(&self) -> Address {
        match self {
            Self::Classic(e) => e.destination,
            Self::Nitro(e) => e.destination,
        }
    }

    /// Returns the position of the message in the outbox. Classic messages are identified by
    /// their unique id.
    pub const fn position(&self) -> U256 {
        match self {
            Self::Classic(e) => e.uniqueId,
            Self::Nitro(e) => e.position,
        }
    }

    /// Returns the L2 block number the message was sent in.
    pub const fn arb_block_num(&self) -> U256 {
        match self {
            Self::Classic(e) => e.arbBlockNum,
            Self::Nitro(e) => e.arbBlockNum,
        }
    }

    /// Returns the L1 block number the L2 block was attached to.
    pub const fn eth_block_num(&self) -> U256 {
        match self {
            Self::Classic(e) => e.ethBlockNum,
            Self::Nitro(e) => e.ethBlockNum,
        }
    }

    /// Returns the L2 timestamp of the message.
    pub const fn timestamp(&self) -> U256 {
        match self {
            Self::Classic(e) => e.timestamp,
            Self::Nitro(e) => e.timestamp,
        }
    }

    /// Returns the value sent along the message.
    pub const fn callvalue(&self) -> U256 {
        match self {
            Self::Classic(e) => e.callvalue,
            Self::Nitro(e) => e.callvalue,
        }
    }

    /// Returns the message calldata.
    pub const fn data(&self) -> &Bytes {
        match self {
            Self::Classic(e) => &e.data,
            Self::Nitro(e) => &e.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, B256};

    #[test]
    fn test_should_decode_delayed_message() -> eyre::Result<()> {
        // Given
        let bridge = address!("0x8315177aB297bA92A06054cE80a67Ed4DBd7ed3a");
        let event = MessageDelivered {
            messageIndex: U256::from(1_234_567u64),
            beforeInboxAcc: B256::repeat_byte(0x11),
            inbox: address!("0x4Dbd4fc535Ac27206064B68FfCf827b0A60BAB3f"),
            kind: 9,
            sender: address!("0x10da8231ef2fd1f77106e10581a1fac14e29e125"),
            messageDataHash: B256::repeat_byte(0x22),
            baseFeeL1: U256::from(30_000_000_000u64),
            timestamp: 1_700_000_000,
        };
        let log = alloy_rpc_types_eth::Log {
            inner: Log { address: bridge, data: event.encode_log_data() },
            block_number: Some(19_000_000),
            block_hash: Some(b256!(
                "0x00000000000000000000000000000000000000000000000000000000000000aa"
            )),
            ..Default::default()
        };

        // When
        let decoded = decode_delayed_message(&log).ok_or_else(|| eyre::eyre!("not decoded"))?;

        // Then
        assert_eq!(decoded.message_index, U256::from(1_234_567u64));
        assert_eq!(decoded.kind, InboxMessageKind::SubmitRetryable);
        assert_eq!(decoded.sender, event.sender);
        assert_eq!(decoded.inbox, event.inbox);
        assert_eq!(decoded.timestamp, 1_700_000_000);
        assert_eq!(decoded.block_number, 19_000_000);

        // missing block information is rejected.
        let mut pending = log;
        pending.block_hash = None;
        assert_eq!(decode_delayed_message(&pending), None);

        Ok(())
    }

    #[test]
    fn test_era_topics_differ() {
        assert_ne!(L2ToL1Transaction::SIGNATURE_HASH, L2ToL1Tx::SIGNATURE_HASH);
    }

    #[test]
    fn test_child_to_parent_accessors() {
        let event: ChildToParentEvent = L2ToL1Tx {
            caller: Address::repeat_byte(1),
            destination: Address::repeat_byte(2),
            hash: U256::from(3),
            position: U256::from(4),
            arbBlockNum: U256::from(5),
            ethBlockNum: U256::from(6),
            timestamp: U256::from(7),
            callvalue: U256::from(8),
            data: Bytes::from_static(&[9]),
        }
        .into();

        assert!(!event.is_classic());
        assert_eq!(event.caller(), Address::repeat_byte(1));
        assert_eq!(event.destination(), Address::repeat_byte(2));
        assert_eq!(event.position(), U256::from(4));
        assert_eq!(event.arb_block_num(), U256::from(5));
        assert_eq!(event.eth_block_num(), U256::from(6));
        assert_eq!(event.timestamp(), U256::from(7));
        assert_eq!(event.callvalue(), U256::from(8));
        assert_eq!(event.data(), &Bytes::from_static(&[9]));
    }
}
