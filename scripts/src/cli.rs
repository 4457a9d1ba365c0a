//! Definitions of CLI arguments and commands for deploy scripts

use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use alloy::providers::Provider;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    backend::AlloyBackend,
    commands::{deploy_random_nft, deploy_svg_nft, verification_failed, DeployContext},
    config::network_config,
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_IMAGES_DIR, DEFAULT_SVG_DIR,
        ETHERSCAN_API_KEY_ENV_VAR, PINATA_API_KEY_ENV_VAR, PINATA_API_SECRET_ENV_VAR,
        UPLOAD_TO_PINATA_ENV_VAR,
    },
    errors::DeployError,
    pinning::PinataClient,
    types::DeployReport,
    uploader::upload_token_uris,
    utils::setup_client,
    verify::ForgeVerifier,
};

/// Deploy the NFT contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer, required by `deploy`
    #[arg(short, long, env = "PKEY")]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The commands of the deploy runner
#[derive(Subcommand)]
pub enum Command {
    /// Run the deploy scripts selected by tag
    Deploy(DeployArgs),
    /// Pin the RandomNFT images & metadata and print the token URIs
    UploadAssets(UploadAssetsArgs),
}

/// Run the deploy scripts selected by tag
#[derive(Args)]
pub struct DeployArgs {
    /// Tags selecting the scripts to run
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    pub tags: Vec<String>,

    /// Directory of compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Directory of RandomNFT images
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,

    /// Directory of SvgNFT images
    #[arg(long, default_value = DEFAULT_SVG_DIR)]
    pub svg_dir: PathBuf,

    /// Pin the RandomNFT images & metadata instead of using the pre-pinned URIs.
    /// Only the value `true` enables uploads
    #[arg(
        long,
        env = UPLOAD_TO_PINATA_ENV_VAR,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub upload_to_pinata: Option<String>,

    /// Block explorer API key; verification is skipped without one
    #[arg(long, env = ETHERSCAN_API_KEY_ENV_VAR)]
    pub etherscan_api_key: Option<String>,

    /// Overrides the number of confirmations to wait for after each deployment
    #[arg(long)]
    pub block_confirmations: Option<u64>,

    /// Pinata credentials
    #[command(flatten)]
    pub pinata: PinataArgs,
}

/// Pin the RandomNFT images & metadata
#[derive(Args)]
pub struct UploadAssetsArgs {
    /// Directory of RandomNFT images
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,

    /// Pinata credentials
    #[command(flatten)]
    pub pinata: PinataArgs,
}

/// Pinata API credentials
#[derive(Args)]
pub struct PinataArgs {
    /// Pinata API key
    #[arg(long, env = PINATA_API_KEY_ENV_VAR)]
    pub pinata_api_key: Option<String>,

    /// Pinata API secret
    #[arg(long, env = PINATA_API_SECRET_ENV_VAR)]
    pub pinata_api_secret: Option<String>,
}

impl DeployArgs {
    /// Whether the RandomNFT assets should be pinned
    pub fn upload_enabled(&self) -> bool {
        self.upload_to_pinata.as_deref() == Some("true")
    }
}

impl PinataArgs {
    /// Build a Pinata client from the credentials
    fn client(self) -> PinataClient {
        PinataClient::new(self.pinata_api_key, self.pinata_api_secret)
    }
}

/// The deploy scripts, in the order the runner executes them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployScript {
    /// Deploys the VRF-minted NFT
    RandomNft,
    /// Deploys the SVG NFT
    SvgNft,
}

impl DeployScript {
    /// Every script, in execution order
    pub const ALL: [DeployScript; 2] = [DeployScript::RandomNft, DeployScript::SvgNft];

    /// The tags which select this script
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            DeployScript::RandomNft => &["all", "randomNFT", "main"],
            DeployScript::SvgNft => &["all", "svgNFT", "main"],
        }
    }

    /// The scripts selected by any of the given tags, in execution order
    pub fn select(tags: &[String]) -> Result<Vec<DeployScript>, DeployError> {
        let scripts = Self::ALL
            .into_iter()
            .filter(|script| tags.iter().any(|tag| script.tags().contains(&tag.as_str())))
            .collect_vec();

        if scripts.is_empty() {
            return Err(DeployError::NoScriptsSelected(tags.join(",")));
        }
        Ok(scripts)
    }
}

impl Display for DeployScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployScript::RandomNft => write!(f, "random-nft"),
            DeployScript::SvgNft => write!(f, "svg-nft"),
        }
    }
}

impl Command {
    /// Run the command against the given RPC endpoint
    pub async fn run(
        self,
        rpc_url: &str,
        priv_key: Option<&str>,
        deployments_path: PathBuf,
    ) -> Result<(), DeployError> {
        match self {
            Command::Deploy(args) => deploy(args, rpc_url, priv_key, deployments_path).await,
            Command::UploadAssets(args) => {
                let pinning = args.pinata.client();
                for uri in upload_token_uris(&args.images_dir, &pinning).await? {
                    println!("{uri}");
                }
                Ok(())
            }
        }
    }
}

/// Run the deploy scripts selected by the arguments' tags
async fn deploy(
    args: DeployArgs,
    rpc_url: &str,
    priv_key: Option<&str>,
    deployments_path: PathBuf,
) -> Result<(), DeployError> {
    let scripts = DeployScript::select(&args.tags)?;
    let priv_key = priv_key.ok_or_else(|| {
        DeployError::ClientInitialization(
            "a deployer private key is required (--priv-key or PKEY)".to_string(),
        )
    })?;

    let (client, deployer) = setup_client(priv_key, rpc_url)?;
    let chain_id = client
        .get_chain_id()
        .await
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let config = network_config(chain_id)?;
    info!(
        "Deploying to {} (chain ID {}) from {:#x}",
        config.name, chain_id, deployer
    );

    let upload_to_pinata = args.upload_enabled();
    let backend = AlloyBackend::new(
        client,
        deployer,
        ArtifactStore::new(args.artifacts),
        config.name,
        deployments_path,
    );
    let pinning = args.pinata.client();
    let verifier = ForgeVerifier::new(chain_id);
    let ctx = DeployContext {
        chain_id,
        upload_to_pinata,
        etherscan_api_key: args.etherscan_api_key,
        block_confirmations: args.block_confirmations,
        images_dir: args.images_dir,
        svg_dir: args.svg_dir,
    };

    for script in scripts {
        info!("Running deploy script `{}`", script);
        let report = match script {
            DeployScript::RandomNft => {
                deploy_random_nft(&ctx, &backend, &pinning, &verifier).await?
            }
            DeployScript::SvgNft => deploy_svg_nft(&ctx, &backend, &verifier).await?,
        };
        log_report(&report);
    }

    Ok(())
}

/// Summarize a script run
fn log_report(report: &DeployReport) {
    info!(
        "{} deployed at {:#x} (stages: {})",
        report.deployment.contract_name,
        report.deployment.address,
        report.stages.iter().join(" -> ")
    );
    if verification_failed(report) {
        warn!(
            "{} is deployed but unverified",
            report.deployment.contract_name
        );
    }
}
