use alloy_primitives::{Address, Bytes, U256};

/// A contract call to simulate or hand over to a transaction builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    /// The sender of the call.
    pub from: Option<Address>,
    /// The called contract.
    pub to: Address,
    /// The calldata.
    pub data: Bytes,
    /// The value attached to the call.
    pub value: U256,
}

impl CallRequest {
    /// Returns a new [`CallRequest`] with no sender.
    pub const fn new(to: Address, data: Bytes, value: U256) -> Self {
        Self { from: None, to, data, value }
    }

    /// Sets the sender of the call.
    pub const fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}
