//! Definitions of the Solidity interfaces called during deployment

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    contract VRFCoordinatorV2Mock {
        constructor(uint96 baseFee, uint96 gasPriceLink);

        event SubscriptionCreated(uint64 indexed subId, address owner);
        event SubscriptionFunded(uint64 indexed subId, uint256 oldBalance, uint256 newBalance);
        event ConsumerAdded(uint64 indexed subId, address consumer);

        function createSubscription() external returns (uint64 _subId);
        function fundSubscription(uint64 _subId, uint96 _amount) public;
        function addConsumer(uint64 _subId, address _consumer) external;
    }
}

// Targets the six-argument constructor taking the coordinator, gas lane and
// callback gas limit alongside the subscription, mint fee and token URIs
sol! {
    contract RandomNFT {
        constructor(
            address vrfCoordinatorV2,
            uint64 subscriptionId,
            bytes32 gasLane,
            uint256 mintFee,
            uint32 callbackGasLimit,
            string[] tokenUris
        );
    }
}

sol! {
    contract SvgNFT {
        constructor(uint256 mintFee, string lowSvg, string highSvg);
    }
}
