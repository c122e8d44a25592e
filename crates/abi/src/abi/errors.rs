use alloy_sol_types::sol;

sol! {
    /// Thrown by the inbox when a retryable ticket is created with the reserved gas values
    /// `gasLimit = 1` or `maxFeePerGas = 1`, echoing the fully resolved ticket.
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    error RetryableData(
        address from,
        address to,
        uint256 l2CallValue,
        uint256 deposit,
        uint256 maxSubmissionCost,
        address excessFeeRefundAddress,
        address callValueRefundAddress,
        uint256 gasLimit,
        uint256 maxFeePerGas,
        bytes data
    );
}
