//! ERIS token contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the surface
//! the orchestrator consumes. The generated call encodings (4-byte selector
//! plus ABI-packed arguments) must match the deployed contract exactly.

use alloy::sol;

sol! {
    /// ERIS token with built-in CCIP cross-chain bridging
    #[sol(rpc)]
    contract ErisToken {
        // ========================================================================
        // View Functions
        // ========================================================================

        /// ERC20 balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Quote the native-currency fee for bridging `amount` to a destination
        function getBridgeFee(string calldata destinationChainName, uint256 amount) external view returns (uint256 fee);

        // ========================================================================
        // Bridge Entry Point
        // ========================================================================

        /// Burn `amount` locally and relay a CCIP message to the destination.
        /// The attached value must cover the bridge fee.
        function sendCCIPCrossChainBridge(string calldata destinationChainName, uint256 amount) external payable;

        // ========================================================================
        // Events
        // ========================================================================

        /// Emitted when the cross-chain message has been handed to CCIP.
        /// `destinationChain` is the CCIP chain selector, not an EVM chain ID.
        event CrossChainSent(
            bytes32 indexed messageId,
            uint64 indexed destinationChain,
            uint256 amount,
            address owner
        );
    }
}
