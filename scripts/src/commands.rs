//! Implementations of the deploy scripts

use std::path::PathBuf;

use alloy_primitives::U256;
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    backend::DeploymentBackend,
    config::{network_config, NetworkConfig},
    constants::{DAY_SVG_FILE, LOCAL_CHAIN_ID, NIGHT_SVG_FILE, SVG_NFT_MINT_FEE},
    errors::DeployError,
    mocks::{provision_mocks, register_consumer},
    pinning::PinningService,
    types::{
        DeployReport, DeployStage, DeploymentArguments, RandomNftArgs, SvgNftArgs,
        VerificationOutcome,
    },
    uploader::{fallback_token_uris, upload_token_uris},
    utils::read_text_file,
    verify::{maybe_verify, ContractVerifier},
};

/// The inputs shared by every deploy script in a run
#[derive(Debug, Clone)]
pub struct DeployContext {
    /// The chain ID of the network deployed to
    pub chain_id: u64,
    /// Whether to pin the RandomNFT images & metadata rather than use the
    /// pre-pinned token URIs
    pub upload_to_pinata: bool,
    /// The block explorer API key, gating verification
    pub etherscan_api_key: Option<String>,
    /// Overrides the network's confirmation count
    pub block_confirmations: Option<u64>,
    /// The directory holding the RandomNFT images
    pub images_dir: PathBuf,
    /// The directory holding the SvgNFT images
    pub svg_dir: PathBuf,
}

impl DeployContext {
    /// Whether the run targets the local network, on which mocks are deployed
    pub fn is_local(&self) -> bool {
        self.chain_id == LOCAL_CHAIN_ID
    }

    /// The number of confirmations to wait for after deploying on the given network
    pub fn wait_confirmations(&self, config: &NetworkConfig) -> u64 {
        self.block_confirmations.unwrap_or_else(|| config.block_confirmations())
    }
}

/// Tracks the stages a script moves through
#[derive(Debug, Default)]
struct StageLog(Vec<DeployStage>);

impl StageLog {
    /// Record that the script reached a stage
    fn enter(&mut self, stage: DeployStage) {
        debug!("stage: {}", stage);
        self.0.push(stage);
    }
}

/// Deploy the VRF-minted NFT contract
///
/// On the local network a VRF coordinator mock and subscription stand in for
/// the live coordinator, and the deployed contract is registered as its consumer.
pub async fn deploy_random_nft<B, P, V>(
    ctx: &DeployContext,
    backend: &B,
    pinning: &P,
    verifier: &V,
) -> Result<DeployReport, DeployError>
where
    B: DeploymentBackend,
    P: PinningService,
    V: ContractVerifier,
{
    let mut stages = StageLog::default();
    let config = network_config(ctx.chain_id)?;
    stages.enter(DeployStage::ConfigResolved);

    let token_uris = if ctx.upload_to_pinata {
        let uris = upload_token_uris(&ctx.images_dir, pinning).await?;
        stages.enter(DeployStage::AssetsUploaded);
        uris
    } else {
        stages.enter(DeployStage::AssetsSkipped);
        fallback_token_uris()
    };

    let (mock, vrf_coordinator, subscription_id) = if ctx.is_local() {
        let (coordinator, subscription) = provision_mocks(backend).await?;
        stages.enter(DeployStage::MocksProvisioned);
        let (address, id) = (subscription.coordinator, subscription.subscription_id);
        (Some((coordinator, subscription)), address, id)
    } else {
        stages.enter(DeployStage::MocksSkipped);
        (None, config.vrf_coordinator()?, config.subscription_id()?)
    };

    info!("----------------------------------------------------");
    let args = DeploymentArguments::RandomNft(RandomNftArgs {
        vrf_coordinator,
        subscription_id,
        gas_lane: config.gas_lane()?,
        mint_fee: config.mint_fee()?,
        callback_gas_limit: config.callback_gas_limit()?,
        token_uris,
    });
    info!("RandomNFT arguments: {}", args.display_values().iter().join(", "));

    let deployment = backend.deploy(&args, ctx.wait_confirmations(config)).await?;
    stages.enter(DeployStage::Deployed);

    let mock_subscription = match mock {
        Some((coordinator, subscription)) => {
            register_consumer(&coordinator, &subscription, deployment.address).await?;
            Some(subscription)
        }
        None => None,
    };

    let verification = maybe_verify(
        verifier,
        config.is_development(),
        ctx.etherscan_api_key.as_deref(),
        &deployment,
        &args,
    )
    .await;
    stages.enter(verification.stage());
    stages.enter(DeployStage::Done);

    Ok(DeployReport {
        deployment,
        arguments: args,
        mock_subscription,
        verification,
        stages: stages.0,
    })
}

/// Read the day & night SVGs from the SVG directory
pub fn read_svgs(ctx: &DeployContext) -> Result<(String, String), DeployError> {
    let day_svg = read_text_file(&ctx.svg_dir.join(DAY_SVG_FILE))?;
    let night_svg = read_text_file(&ctx.svg_dir.join(NIGHT_SVG_FILE))?;
    Ok((day_svg, night_svg))
}

/// Deploy the SVG NFT contract
pub async fn deploy_svg_nft<B, V>(
    ctx: &DeployContext,
    backend: &B,
    verifier: &V,
) -> Result<DeployReport, DeployError>
where
    B: DeploymentBackend,
    V: ContractVerifier,
{
    let mut stages = StageLog::default();
    let config = network_config(ctx.chain_id)?;
    stages.enter(DeployStage::ConfigResolved);

    let (day_svg, night_svg) = read_svgs(ctx)?;
    stages.enter(DeployStage::AssetsLoaded);
    stages.enter(DeployStage::MocksSkipped);

    info!("----------------------------------------------------");
    let mint_fee = U256::from_str_radix(SVG_NFT_MINT_FEE, 10)
        .map_err(|e| DeployError::MissingConfig(e.to_string()))?;
    let args = DeploymentArguments::SvgNft(SvgNftArgs {
        mint_fee,
        day_svg,
        night_svg,
    });

    let deployment = backend.deploy(&args, ctx.wait_confirmations(config)).await?;
    stages.enter(DeployStage::Deployed);

    let verification = maybe_verify(
        verifier,
        config.is_development(),
        ctx.etherscan_api_key.as_deref(),
        &deployment,
        &args,
    )
    .await;
    stages.enter(verification.stage());
    stages.enter(DeployStage::Done);

    Ok(DeployReport {
        deployment,
        arguments: args,
        mock_subscription: None,
        verification,
        stages: stages.0,
    })
}

/// Whether a report's verification step was attempted and failed
pub fn verification_failed(report: &DeployReport) -> bool {
    matches!(report.verification, VerificationOutcome::Failed(_))
}
