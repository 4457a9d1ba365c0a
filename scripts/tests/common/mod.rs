//! In-memory stand-ins for the chain, pinning service and verifier

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use alloy_primitives::{aliases::U96, Address, B256};
use scripts::{
    backend::{DeploymentBackend, MockCoordinator},
    commands::DeployContext,
    errors::DeployError,
    pinning::{PinResponse, PinningService},
    types::{Deployment, DeploymentArguments, TokenMetadata},
    verify::ContractVerifier,
};
use tempfile::TempDir;

/// The deployer address used by the fake backend
pub const DEPLOYER: Address = Address::new([0xde; 20]);

/// A subscription held by the fake coordinator
#[derive(Debug, Clone, Default)]
pub struct FakeSubscription {
    /// The subscription ID
    pub id: u64,
    /// The total amount funded
    pub funded: U96,
    /// The registered consumers
    pub consumers: Vec<Address>,
}

/// The state of the fake chain
#[derive(Debug, Default)]
pub struct FakeChain {
    /// Every deployment, with the confirmations waited for
    pub deployments: Vec<(DeploymentArguments, Address, u64)>,
    /// The subscriptions created on the coordinator mock
    pub subscriptions: Vec<FakeSubscription>,
    /// A contract whose deployment reverts
    pub revert_contract: Option<&'static str>,
}

impl FakeChain {
    /// The arguments of every deployed contract, in deployment order
    pub fn deployed_names(&self) -> Vec<&'static str> {
        self.deployments
            .iter()
            .map(|(args, _, _)| args.contract_name())
            .collect()
    }
}

/// A deployment backend which records deployments in memory
#[derive(Clone, Default)]
pub struct FakeBackend {
    /// The shared chain state
    pub chain: Arc<Mutex<FakeChain>>,
}

impl FakeBackend {
    /// A backend on which deploying the given contract reverts
    pub fn reverting(contract: &'static str) -> Self {
        let backend = Self::default();
        backend.chain.lock().unwrap().revert_contract = Some(contract);
        backend
    }
}

impl DeploymentBackend for FakeBackend {
    type Coordinator = FakeCoordinator;

    fn deployer(&self) -> Address {
        DEPLOYER
    }

    async fn deploy(
        &self,
        args: &DeploymentArguments,
        wait_confirmations: u64,
    ) -> Result<Deployment, DeployError> {
        let mut chain = self.chain.lock().unwrap();
        if chain.revert_contract == Some(args.contract_name()) {
            return Err(DeployError::ContractDeployment(format!(
                "{} reverted",
                args.contract_name()
            )));
        }

        let nonce = chain.deployments.len() as u8;
        let address = Address::repeat_byte(0xa0 + nonce);
        chain
            .deployments
            .push((args.clone(), address, wait_confirmations));

        Ok(Deployment {
            contract_name: args.contract_name().to_string(),
            address,
            transaction_hash: B256::repeat_byte(nonce),
            block_number: Some(nonce as u64 + 1),
            gas_used: 1_000_000,
        })
    }

    fn coordinator_at(&self, address: Address) -> FakeCoordinator {
        FakeCoordinator {
            address,
            chain: self.chain.clone(),
        }
    }
}

/// A coordinator mock which records subscriptions in memory
pub struct FakeCoordinator {
    /// The coordinator address
    address: Address,
    /// The shared chain state
    chain: Arc<Mutex<FakeChain>>,
}

impl MockCoordinator for FakeCoordinator {
    fn address(&self) -> Address {
        self.address
    }

    async fn create_subscription(&self) -> Result<u64, DeployError> {
        let mut chain = self.chain.lock().unwrap();
        let id = chain.subscriptions.len() as u64 + 1;
        chain.subscriptions.push(FakeSubscription {
            id,
            ..Default::default()
        });
        Ok(id)
    }

    async fn fund_subscription(
        &self,
        subscription_id: u64,
        amount: U96,
    ) -> Result<(), DeployError> {
        let mut chain = self.chain.lock().unwrap();
        let sub = subscription(&mut chain, subscription_id)?;
        sub.funded += amount;
        Ok(())
    }

    async fn add_consumer(
        &self,
        subscription_id: u64,
        consumer: Address,
    ) -> Result<(), DeployError> {
        let mut chain = self.chain.lock().unwrap();
        let sub = subscription(&mut chain, subscription_id)?;
        sub.consumers.push(consumer);
        Ok(())
    }
}

/// Look up a subscription, failing like the mock's `InvalidSubscription` revert
fn subscription(chain: &mut FakeChain, id: u64) -> Result<&mut FakeSubscription, DeployError> {
    chain
        .subscriptions
        .iter_mut()
        .find(|sub| sub.id == id)
        .ok_or_else(|| DeployError::ContractInteraction("InvalidSubscription".to_string()))
}

/// A single call made to the fake pinning service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinCall {
    /// A file was pinned
    File(String),
    /// A metadata document was pinned
    Json(TokenMetadata),
}

/// A pinning service which hands out sequential hashes
#[derive(Default)]
pub struct FakePinning {
    /// Every call, in order
    pub calls: Mutex<Vec<PinCall>>,
    /// Fail the call with this index
    pub fail_at: Option<usize>,
}

impl FakePinning {
    /// A pinning service failing its n-th call
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Default::default()
        }
    }

    /// Record a call, returning the hash it is assigned
    fn record(&self, call: PinCall) -> Result<PinResponse, DeployError> {
        let mut calls = self.calls.lock().unwrap();
        if self.fail_at == Some(calls.len()) {
            return Err(DeployError::Upload("pinning service unavailable".to_string()));
        }

        let prefix = match call {
            PinCall::File(_) => "QmImage",
            PinCall::Json(_) => "QmMeta",
        };
        calls.push(call);
        Ok(PinResponse {
            ipfs_hash: format!("{prefix}{}", calls.len()),
            pin_size: 0,
            timestamp: String::new(),
        })
    }

    /// The metadata documents pinned, in order
    pub fn metadata(&self) -> Vec<TokenMetadata> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                PinCall::Json(metadata) => Some(metadata.clone()),
                PinCall::File(_) => None,
            })
            .collect()
    }

    /// The number of calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PinningService for FakePinning {
    async fn upload_file(&self, path: &Path) -> Result<PinResponse, DeployError> {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.record(PinCall::File(name))
    }

    async fn upload_json(&self, metadata: &TokenMetadata) -> Result<PinResponse, DeployError> {
        self.record(PinCall::Json(metadata.clone()))
    }
}

/// A verifier which records the addresses it is asked to verify
#[derive(Default)]
pub struct FakeVerifier {
    /// The addresses & API keys verified
    pub calls: Mutex<Vec<(Address, String)>>,
    /// Whether verification fails
    pub fail: bool,
}

impl FakeVerifier {
    /// A verifier which always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// The number of verification attempts
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ContractVerifier for FakeVerifier {
    async fn verify(
        &self,
        deployment: &Deployment,
        _args: &DeploymentArguments,
        api_key: &str,
    ) -> Result<(), DeployError> {
        self.calls
            .lock()
            .unwrap()
            .push((deployment.address, api_key.to_string()));

        if self.fail {
            return Err(DeployError::Verification("already verified".to_string()));
        }
        Ok(())
    }
}

/// A temporary asset directory for a test
pub struct Assets {
    /// The temporary root, removed on drop
    pub dir: TempDir,
}

impl Assets {
    /// Create an asset tree with the given RandomNFT image names and the
    /// day & night SVGs
    pub fn new(image_names: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("randomNft");
        let svgs = dir.path().join("svgNFT");
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(&svgs).unwrap();

        for name in image_names {
            fs::write(images.join(name), b"\x89PNG").unwrap();
        }
        fs::write(svgs.join("day.svg"), "<svg id=\"day\"/>").unwrap();
        fs::write(svgs.join("night.svg"), "<svg id=\"night\"/>").unwrap();

        Self { dir }
    }

    /// The RandomNFT image directory
    pub fn images_dir(&self) -> PathBuf {
        self.dir.path().join("randomNft")
    }

    /// The SvgNFT image directory
    pub fn svg_dir(&self) -> PathBuf {
        self.dir.path().join("svgNFT")
    }

    /// A deploy context on the given chain, reading assets from this tree
    pub fn context(&self, chain_id: u64) -> DeployContext {
        DeployContext {
            chain_id,
            upload_to_pinata: false,
            etherscan_api_key: None,
            block_confirmations: None,
            images_dir: self.images_dir(),
            svg_dir: self.svg_dir(),
        }
    }
}
