//! Provisioning the VRF coordinator mock on the local network

use alloy_primitives::{aliases::U96, Address};
use tracing::info;

use crate::{
    backend::{DeploymentBackend, MockCoordinator},
    constants::{BASE_FEE, DEFAULT_BLOCK_CONFIRMATIONS, FUND_AMOUNT, GAS_PRICE_LINK},
    errors::DeployError,
    types::{DeploymentArguments, MockSubscription},
};

/// The constructor arguments of the VRF coordinator mock
pub fn vrf_coordinator_mock_args() -> DeploymentArguments {
    DeploymentArguments::VrfCoordinatorMock {
        base_fee: U96::from(BASE_FEE),
        gas_price_link: U96::from(GAS_PRICE_LINK),
    }
}

/// Deploy the VRF coordinator mock, then create and fund a subscription on it
///
/// The mock does not move LINK when funding, so no token balance is needed.
pub async fn provision_mocks<B: DeploymentBackend>(
    backend: &B,
) -> Result<(B::Coordinator, MockSubscription), DeployError> {
    info!(
        "Local network detected! Deploying mocks from {:#x}...",
        backend.deployer()
    );

    let deployment = backend
        .deploy(&vrf_coordinator_mock_args(), DEFAULT_BLOCK_CONFIRMATIONS)
        .await
        .map_err(mock_error)?;
    let coordinator = backend.coordinator_at(deployment.address);

    let subscription_id = coordinator.create_subscription().await.map_err(mock_error)?;
    coordinator
        .fund_subscription(subscription_id, U96::from(FUND_AMOUNT))
        .await
        .map_err(mock_error)?;

    info!("Mocks Deployed!");
    info!("----------------------------------------------------");
    info!("You are deploying to a local network, you'll need a local network running to interact");

    let subscription = MockSubscription {
        coordinator: coordinator.address(),
        subscription_id,
    };
    Ok((coordinator, subscription))
}

/// Authorize the deployed consumer to draw on the mock subscription
pub async fn register_consumer<C: MockCoordinator>(
    coordinator: &C,
    subscription: &MockSubscription,
    consumer: Address,
) -> Result<(), DeployError> {
    coordinator
        .add_consumer(subscription.subscription_id, consumer)
        .await
        .map_err(mock_error)?;

    info!(
        "Added consumer {:#x} to subscription {}",
        consumer, subscription.subscription_id
    );
    Ok(())
}

/// Reclassify a collaborator failure as a mock provisioning failure
fn mock_error(err: DeployError) -> DeployError {
    DeployError::MockProvision(err.to_string())
}
