//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{aliases::U96, hex, Address, B256, U256};
use alloy_sol_types::SolConstructor;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{RANDOM_NFT_CONTRACT, SVG_NFT_CONTRACT, VRF_COORDINATOR_MOCK_CONTRACT},
    solidity::{RandomNFT, SvgNFT, VRFCoordinatorV2Mock},
};

// ------------------
// | Token Metadata |
// ------------------

/// The metadata document a RandomNFT token URI resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// The name of the token
    pub name: String,
    /// A human-readable description of the token
    pub description: String,
    /// The `ipfs://` URI of the token image
    pub image: String,
    /// The token's traits
    pub attributes: Vec<Attribute>,
}

/// A single set of traits attached to a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The personality trait, absent when the image name does not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    /// The skill trait, absent when the image name does not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl TokenMetadata {
    /// The template each token's metadata starts from
    ///
    /// Every call returns a new value, so filling in one token's attributes
    /// never leaks into another's.
    pub fn template() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            image: String::new(),
            attributes: vec![Attribute {
                personality: Some("test personality".to_string()),
                skill: Some("test skill".to_string()),
            }],
        }
    }

    /// Build the metadata of a single token from the template
    pub fn new(
        name: &str,
        image_uri: String,
        personality: Option<String>,
        skill: Option<String>,
    ) -> Self {
        let mut metadata = Self::template();
        metadata.name = name.to_string();
        metadata.description = format!("Adventure with {name}!");
        metadata.image = image_uri;
        metadata.attributes[0] = Attribute { personality, skill };
        metadata
    }
}

// ---------------
// | Deployments |
// ---------------

/// The constructor arguments of a contract, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentArguments {
    /// Arguments of the VRF-minted NFT contract
    RandomNft(RandomNftArgs),
    /// Arguments of the SVG NFT contract
    SvgNft(SvgNftArgs),
    /// Arguments of the VRF coordinator mock
    VrfCoordinatorMock {
        /// The premium charged per request, in LINK wei
        base_fee: U96,
        /// The LINK wei charged per unit of gas
        gas_price_link: U96,
    },
}

/// The constructor arguments of the VRF-minted NFT contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomNftArgs {
    /// The VRF coordinator address
    pub vrf_coordinator: Address,
    /// The VRF subscription paying for randomness requests
    pub subscription_id: u64,
    /// The VRF gas lane key hash
    pub gas_lane: B256,
    /// The mint fee, in wei
    pub mint_fee: U256,
    /// The gas limit of the VRF fulfillment callback
    pub callback_gas_limit: u32,
    /// The metadata URIs of the mintable tokens
    pub token_uris: Vec<String>,
}

/// The constructor arguments of the SVG NFT contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgNftArgs {
    /// The mint fee, in wei
    pub mint_fee: U256,
    /// The SVG shown by day
    pub day_svg: String,
    /// The SVG shown by night
    pub night_svg: String,
}

impl DeploymentArguments {
    /// The artifact name of the contract these arguments construct
    pub fn contract_name(&self) -> &'static str {
        match self {
            DeploymentArguments::RandomNft(_) => RANDOM_NFT_CONTRACT,
            DeploymentArguments::SvgNft(_) => SVG_NFT_CONTRACT,
            DeploymentArguments::VrfCoordinatorMock { .. } => VRF_COORDINATOR_MOCK_CONTRACT,
        }
    }

    /// ABI-encode the arguments, to be appended to the contract's creation code
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            DeploymentArguments::RandomNft(args) => RandomNFT::constructorCall {
                vrfCoordinatorV2: args.vrf_coordinator,
                subscriptionId: args.subscription_id,
                gasLane: args.gas_lane,
                mintFee: args.mint_fee,
                callbackGasLimit: args.callback_gas_limit,
                tokenUris: args.token_uris.clone(),
            }
            .abi_encode(),
            DeploymentArguments::SvgNft(args) => SvgNFT::constructorCall {
                mintFee: args.mint_fee,
                lowSvg: args.day_svg.clone(),
                highSvg: args.night_svg.clone(),
            }
            .abi_encode(),
            DeploymentArguments::VrfCoordinatorMock {
                base_fee,
                gas_price_link,
            } => VRFCoordinatorV2Mock::constructorCall {
                baseFee: *base_fee,
                gasPriceLink: *gas_price_link,
            }
            .abi_encode(),
        }
    }

    /// The ABI-encoded arguments as a `0x`-prefixed hex string
    pub fn abi_encode_hex(&self) -> String {
        hex::encode_prefixed(self.abi_encode())
    }

    /// Render each argument for display in logs
    pub fn display_values(&self) -> Vec<String> {
        match self {
            DeploymentArguments::RandomNft(args) => vec![
                format!("{:#x}", args.vrf_coordinator),
                args.subscription_id.to_string(),
                format!("{}", args.gas_lane),
                args.mint_fee.to_string(),
                args.callback_gas_limit.to_string(),
                format!("[{}]", args.token_uris.join(", ")),
            ],
            DeploymentArguments::SvgNft(args) => vec![
                args.mint_fee.to_string(),
                format!("<svg: {} bytes>", args.day_svg.len()),
                format!("<svg: {} bytes>", args.night_svg.len()),
            ],
            DeploymentArguments::VrfCoordinatorMock {
                base_fee,
                gas_price_link,
            } => vec![base_fee.to_string(), gas_price_link.to_string()],
        }
    }
}

/// The record of a completed contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// The artifact name of the deployed contract
    pub contract_name: String,
    /// The address of the deployed contract
    pub address: Address,
    /// The hash of the creation transaction
    pub transaction_hash: B256,
    /// The block in which the creation transaction was included
    pub block_number: Option<u64>,
    /// The gas used by the creation transaction
    pub gas_used: u64,
}

/// A VRF subscription created on the mock coordinator for a local run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSubscription {
    /// The address of the mock coordinator
    pub coordinator: Address,
    /// The ID of the created subscription
    pub subscription_id: u64,
}

// -----------
// | Reports |
// -----------

/// The stages a deploy script moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    /// The network config has been resolved
    ConfigResolved,
    /// Token images & metadata have been pinned
    AssetsUploaded,
    /// Fallback token URIs are used in place of an upload
    AssetsSkipped,
    /// Local assets have been read from disk
    AssetsLoaded,
    /// The VRF coordinator mock has been deployed and a subscription funded
    MocksProvisioned,
    /// The live VRF coordinator is used
    MocksSkipped,
    /// The contract has been deployed
    Deployed,
    /// The contract source has been verified
    Verified,
    /// Verification was not attempted
    VerificationSkipped,
    /// Verification was attempted and failed
    VerificationFailed,
    /// The script has finished
    Done,
}

impl Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployStage::ConfigResolved => write!(f, "config-resolved"),
            DeployStage::AssetsUploaded => write!(f, "assets-uploaded"),
            DeployStage::AssetsSkipped => write!(f, "assets-skipped"),
            DeployStage::AssetsLoaded => write!(f, "assets-loaded"),
            DeployStage::MocksProvisioned => write!(f, "mocks-provisioned"),
            DeployStage::MocksSkipped => write!(f, "mocks-skipped"),
            DeployStage::Deployed => write!(f, "deployed"),
            DeployStage::Verified => write!(f, "verified"),
            DeployStage::VerificationSkipped => write!(f, "verification-skipped"),
            DeployStage::VerificationFailed => write!(f, "verification-failed"),
            DeployStage::Done => write!(f, "done"),
        }
    }
}

/// The result of the verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The contract source was verified
    Verified,
    /// Verification was not attempted
    Skipped,
    /// Verification was attempted and failed with the given message
    Failed(String),
}

impl VerificationOutcome {
    /// The stage reached by this outcome
    pub fn stage(&self) -> DeployStage {
        match self {
            VerificationOutcome::Verified => DeployStage::Verified,
            VerificationOutcome::Skipped => DeployStage::VerificationSkipped,
            VerificationOutcome::Failed(_) => DeployStage::VerificationFailed,
        }
    }
}

/// A summary of a single deploy script run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// The deployed contract
    pub deployment: Deployment,
    /// The constructor arguments the contract was deployed with
    pub arguments: DeploymentArguments,
    /// The mock subscription created for a local run
    pub mock_subscription: Option<MockSubscription>,
    /// The result of the verification step
    pub verification: VerificationOutcome,
    /// The stages visited, in order
    pub stages: Vec<DeployStage>,
}
