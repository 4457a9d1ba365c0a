//! The chain-facing collaborators of the deploy scripts: a backend which
//! deploys contracts, and a handle on the VRF coordinator mock

use std::path::PathBuf;

use alloy::{
    network::TransactionBuilder,
    primitives::{aliases::U96, Address, Log},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use alloy_sol_types::SolEvent;
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    errors::DeployError,
    solidity::VRFCoordinatorV2Mock::{self, SubscriptionCreated},
    types::{Deployment, DeploymentArguments},
    utils::{write_deployed_address, Wallet},
};

/// Deploys contracts on behalf of the deployer account
#[allow(async_fn_in_trait)]
pub trait DeploymentBackend {
    /// The handle type of a deployed VRF coordinator mock
    type Coordinator: MockCoordinator;

    /// The address of the deployer account
    fn deployer(&self) -> Address;

    /// Deploy the contract the arguments construct, waiting for the given
    /// number of confirmations
    async fn deploy(
        &self,
        args: &DeploymentArguments,
        wait_confirmations: u64,
    ) -> Result<Deployment, DeployError>;

    /// A handle on the VRF coordinator mock deployed at the given address
    fn coordinator_at(&self, address: Address) -> Self::Coordinator;
}

/// The subscription management surface of the VRF coordinator mock
#[allow(async_fn_in_trait)]
pub trait MockCoordinator {
    /// The address of the coordinator
    fn address(&self) -> Address;

    /// Create a subscription, returning its ID
    async fn create_subscription(&self) -> Result<u64, DeployError>;

    /// Fund a subscription with the given amount of LINK wei
    async fn fund_subscription(&self, subscription_id: u64, amount: U96)
        -> Result<(), DeployError>;

    /// Authorize a consumer contract to draw on a subscription
    async fn add_consumer(&self, subscription_id: u64, consumer: Address)
        -> Result<(), DeployError>;
}

/// Extract the ID of a newly created subscription from a transaction's logs
///
/// Logs are matched by the `SubscriptionCreated` event signature rather than
/// position, so other events emitted alongside it are skipped.
pub fn subscription_id_from_logs<'a>(
    logs: impl IntoIterator<Item = &'a Log>,
) -> Result<u64, DeployError> {
    logs.into_iter()
        .find_map(|log| SubscriptionCreated::decode_log(log, true).ok())
        .map(|event| event.data.subId)
        .ok_or_else(|| {
            DeployError::ContractInteraction(
                "no SubscriptionCreated event in createSubscription receipt".to_string(),
            )
        })
}

// -----------------
// | Alloy Backend |
// -----------------

/// A [`DeploymentBackend`] which sends transactions over RPC, deploying
/// bytecode from compiled artifacts
#[derive(Clone)]
pub struct AlloyBackend {
    /// The provider, with the deployer's wallet attached
    provider: Wallet,
    /// The deployer address
    deployer: Address,
    /// The compiled contract artifacts
    artifacts: ArtifactStore,
    /// The name of the network deployed to, used to key the deployments file
    network: String,
    /// The file in which deployed addresses are recorded
    deployments_path: PathBuf,
}

impl AlloyBackend {
    /// Create a backend deploying from the given artifacts with the given client
    pub fn new(
        provider: Wallet,
        deployer: Address,
        artifacts: ArtifactStore,
        network: impl Into<String>,
        deployments_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            deployer,
            artifacts,
            network: network.into(),
            deployments_path: deployments_path.into(),
        }
    }
}

impl DeploymentBackend for AlloyBackend {
    type Coordinator = AlloyCoordinator;

    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(
        &self,
        args: &DeploymentArguments,
        wait_confirmations: u64,
    ) -> Result<Deployment, DeployError> {
        let contract_name = args.contract_name();
        let mut deploy_code = self.artifacts.bytecode(contract_name)?.to_vec();
        deploy_code.extend(args.abi_encode());

        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(deploy_code);

        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;
        let tx_hash = *pending_tx.tx_hash();
        info!("deploying \"{}\" (tx: {:#x})...", contract_name, tx_hash);

        let receipt = pending_tx
            .with_required_confirmations(wait_confirmations)
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(DeployError::ContractDeployment(format!(
                "{contract_name} creation transaction {tx_hash:#x} reverted"
            )));
        }
        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::ContractDeployment(format!(
                "{contract_name} creation receipt has no contract address"
            ))
        })?;
        info!(
            "deployed \"{}\" at {:#x} with {} gas",
            contract_name, address, receipt.gas_used
        );

        write_deployed_address(&self.deployments_path, &self.network, contract_name, address)?;

        Ok(Deployment {
            contract_name: contract_name.to_string(),
            address,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }

    fn coordinator_at(&self, address: Address) -> AlloyCoordinator {
        AlloyCoordinator {
            address,
            provider: self.provider.clone(),
        }
    }
}

/// A [`MockCoordinator`] reached over RPC
#[derive(Clone)]
pub struct AlloyCoordinator {
    /// The address of the coordinator
    address: Address,
    /// The provider, with the deployer's wallet attached
    provider: Wallet,
}

impl MockCoordinator for AlloyCoordinator {
    fn address(&self) -> Address {
        self.address
    }

    async fn create_subscription(&self) -> Result<u64, DeployError> {
        let coordinator = VRFCoordinatorV2Mock::new(self.address, self.provider.clone());
        let receipt = coordinator
            .createSubscription()
            .send()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

        subscription_id_from_logs(receipt.inner.logs().iter().map(|log| &log.inner))
    }

    async fn fund_subscription(
        &self,
        subscription_id: u64,
        amount: U96,
    ) -> Result<(), DeployError> {
        let coordinator = VRFCoordinatorV2Mock::new(self.address, self.provider.clone());
        coordinator
            .fundSubscription(subscription_id, amount)
            .send()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
            .watch()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

        Ok(())
    }

    async fn add_consumer(
        &self,
        subscription_id: u64,
        consumer: Address,
    ) -> Result<(), DeployError> {
        let coordinator = VRFCoordinatorV2Mock::new(self.address, self.provider.clone());
        coordinator
            .addConsumer(subscription_id, consumer)
            .send()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
            .watch()
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

        Ok(())
    }
}
