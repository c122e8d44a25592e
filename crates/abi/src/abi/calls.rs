use alloy_sol_types::sol;

sol! {
    // *********************INBOX*********************
    #[derive(Debug, PartialEq, Eq)]
    function createRetryableTicket(
        address to,
        uint256 l2CallValue,
        uint256 maxSubmissionCost,
        address excessFeeRefundAddress,
        address callValueRefundAddress,
        uint256 gasLimit,
        uint256 maxFeePerGas,
        bytes calldata data
    ) external payable returns (uint256);

    #[derive(Debug, PartialEq, Eq)]
    function calculateRetryableSubmissionFee(uint256 dataLength, uint256 baseFee)
        external
        view
        returns (uint256);

    // *********************BRIDGE*********************
    #[derive(Debug, PartialEq, Eq)]
    function delayedInboxAccs(uint256 index) external view returns (bytes32);

    // *********************SEQUENCER INBOX*********************
    #[derive(Debug, PartialEq, Eq)]
    function totalDelayedMessagesRead() external view returns (uint256);

    #[derive(Debug, PartialEq, Eq)]
    function forceInclusion(
        uint256 _totalDelayedMessagesRead,
        uint8 kind,
        uint64[2] calldata l1BlockAndTime,
        uint256 baseFeeL1,
        address sender,
        bytes32 messageDataHash
    ) external;

    // *********************ARBSYS*********************
    #[derive(Debug, PartialEq, Eq)]
    function withdrawEth(address destination) external payable returns (uint256);

    #[derive(Debug, PartialEq, Eq)]
    function sendTxToL1(address destination, bytes calldata data)
        external
        payable
        returns (uint256);

    // *********************NODE INTERFACE*********************
    /// Simulates the L2 execution of a retryable ticket. Only callable through `eth_estimateGas`.
    #[derive(Debug, PartialEq, Eq)]
    function estimateRetryableTicket(
        address sender,
        uint256 deposit,
        address to,
        uint256 l2CallValue,
        address excessFeeRefundAddress,
        address callValueRefundAddress,
        bytes calldata data
    ) external;
}
