mod common;

use alloy_primitives::{aliases::U96, Address};
use common::{Assets, FakeBackend, FakePinning, FakeVerifier, PinCall};
use eyre::Result;
use scripts::{
    commands::deploy_random_nft,
    config::network_config,
    constants::{FALLBACK_TOKEN_URIS, FUND_AMOUNT, LOCAL_CHAIN_ID},
    errors::DeployError,
    types::{DeployStage, DeploymentArguments, RandomNftArgs, VerificationOutcome},
};

/// The chain ID of Goerli, a live network with a configured coordinator
const GOERLI_CHAIN_ID: u64 = 5;

fn random_nft_args(args: &DeploymentArguments) -> &RandomNftArgs {
    match args {
        DeploymentArguments::RandomNft(args) => args,
        other => panic!("expected RandomNFT arguments, got {other:?}"),
    }
}

#[tokio::test]
async fn test_local_deploy_with_fallback_uris() -> Result<()> {
    let assets = Assets::new(&["pug_friendly_digging.png"]);
    let mut ctx = assets.context(LOCAL_CHAIN_ID);
    // An API key alone must not trigger verification on a development chain
    ctx.etherscan_api_key = Some("KEY".to_string());

    let backend = FakeBackend::default();
    let pinning = FakePinning::default();
    let verifier = FakeVerifier::default();

    let report = deploy_random_nft(&ctx, &backend, &pinning, &verifier).await?;
    let chain = backend.chain.lock().unwrap();

    // The mock is deployed first, then the consumer
    assert_eq!(chain.deployed_names(), vec!["VRFCoordinatorV2Mock", "RandomNFT"]);
    let mock_address = chain.deployments[0].1;

    // The subscription is created, funded & consumed by the deployed contract
    let subscription = report.mock_subscription.expect("local run creates a subscription");
    assert_eq!(subscription.coordinator, mock_address);
    assert_eq!(chain.subscriptions.len(), 1);
    assert_eq!(chain.subscriptions[0].id, subscription.subscription_id);
    assert_eq!(chain.subscriptions[0].funded, U96::from(FUND_AMOUNT));
    assert_eq!(
        chain.subscriptions[0].consumers,
        vec![report.deployment.address]
    );

    // The contract is built against the mock with the pre-pinned URIs
    let args = random_nft_args(&report.arguments);
    assert_eq!(args.vrf_coordinator, mock_address);
    assert_eq!(args.subscription_id, subscription.subscription_id);
    assert_eq!(args.token_uris, FALLBACK_TOKEN_URIS.to_vec());

    assert_eq!(pinning.call_count(), 0);
    assert_eq!(verifier.call_count(), 0);
    assert_eq!(report.verification, VerificationOutcome::Skipped);
    assert_eq!(
        report.stages,
        vec![
            DeployStage::ConfigResolved,
            DeployStage::AssetsSkipped,
            DeployStage::MocksProvisioned,
            DeployStage::Deployed,
            DeployStage::VerificationSkipped,
            DeployStage::Done,
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_live_deploy_uses_configured_coordinator() -> Result<()> {
    let assets = Assets::new(&[]);
    let ctx = assets.context(GOERLI_CHAIN_ID);
    let backend = FakeBackend::default();

    let report = deploy_random_nft(
        &ctx,
        &backend,
        &FakePinning::default(),
        &FakeVerifier::default(),
    )
    .await?;

    let config = network_config(GOERLI_CHAIN_ID)?;
    let args = random_nft_args(&report.arguments);
    assert_eq!(args.vrf_coordinator, config.vrf_coordinator()?);
    assert_eq!(args.subscription_id, 1002);
    assert_eq!(args.gas_lane, config.gas_lane()?);
    assert_eq!(args.mint_fee, config.mint_fee()?);
    assert_eq!(args.callback_gas_limit, 500_000);

    // No mock, and Goerli's confirmation count is used
    let chain = backend.chain.lock().unwrap();
    assert_eq!(chain.deployed_names(), vec!["RandomNFT"]);
    assert_eq!(chain.deployments[0].2, 6);
    assert!(report.mock_subscription.is_none());
    assert!(report.stages.contains(&DeployStage::MocksSkipped));

    Ok(())
}

#[tokio::test]
async fn test_upload_produces_one_uri_per_image_in_order() -> Result<()> {
    let assets = Assets::new(&[
        "st-bernard_calm_rescue.png",
        "pug_friendly_digging.png",
        "shiba-inu_shy_napping.png",
    ]);
    let mut ctx = assets.context(LOCAL_CHAIN_ID);
    ctx.upload_to_pinata = true;

    let backend = FakeBackend::default();
    let pinning = FakePinning::default();
    let report = deploy_random_nft(&ctx, &backend, &pinning, &FakeVerifier::default()).await?;

    // Every image is pinned before any metadata, in file name order
    let calls = pinning.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], PinCall::File("pug_friendly_digging.png".to_string()));
    assert_eq!(calls[1], PinCall::File("shiba-inu_shy_napping.png".to_string()));
    assert_eq!(calls[2], PinCall::File("st-bernard_calm_rescue.png".to_string()));
    assert!(matches!(calls[3], PinCall::Json(_)));

    let args = random_nft_args(&report.arguments);
    assert_eq!(
        args.token_uris,
        vec!["ipfs://QmMeta4", "ipfs://QmMeta5", "ipfs://QmMeta6"]
    );

    let metadata = pinning.metadata();
    assert_eq!(metadata[0].name, "pug");
    assert_eq!(metadata[0].description, "Adventure with pug!");
    assert_eq!(metadata[0].image, "ipfs://QmImage1");
    assert_eq!(metadata[0].attributes[0].personality.as_deref(), Some("friendly"));
    assert_eq!(metadata[0].attributes[0].skill.as_deref(), Some("digging"));
    assert_eq!(metadata[2].name, "st-bernard");
    assert_eq!(metadata[2].image, "ipfs://QmImage3");

    assert!(report.stages.contains(&DeployStage::AssetsUploaded));
    Ok(())
}

#[tokio::test]
async fn test_malformed_image_names_degrade_without_failing() -> Result<()> {
    let assets = Assets::new(&["mystery.png", "corgi_bold.png"]);
    let mut ctx = assets.context(LOCAL_CHAIN_ID);
    ctx.upload_to_pinata = true;

    let pinning = FakePinning::default();
    deploy_random_nft(&ctx, &FakeBackend::default(), &pinning, &FakeVerifier::default()).await?;

    let metadata = pinning.metadata();
    assert_eq!(metadata.len(), 2);

    assert_eq!(metadata[0].name, "corgi");
    assert_eq!(metadata[0].attributes[0].personality.as_deref(), Some("bold"));
    assert_eq!(metadata[0].attributes[0].skill, None);

    assert_eq!(metadata[1].name, "mystery");
    assert_eq!(metadata[1].attributes[0].personality, None);
    assert_eq!(metadata[1].attributes[0].skill, None);

    // Absent traits are dropped from the pinned document
    let json = serde_json::to_value(&metadata[1])?;
    assert_eq!(json["attributes"], serde_json::json!([{}]));
    Ok(())
}

#[tokio::test]
async fn test_upload_flag_absent_ignores_images() -> Result<()> {
    let assets = Assets::new(&["pug_friendly_digging.png", "corgi_bold_herding.png"]);
    let ctx = assets.context(LOCAL_CHAIN_ID);

    let pinning = FakePinning::default();
    let report =
        deploy_random_nft(&ctx, &FakeBackend::default(), &pinning, &FakeVerifier::default())
            .await?;

    assert_eq!(
        random_nft_args(&report.arguments).token_uris,
        FALLBACK_TOKEN_URIS.to_vec()
    );
    assert_eq!(pinning.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_upload_failure_aborts_before_deploying() -> Result<()> {
    let assets = Assets::new(&["pug_friendly_digging.png", "corgi_bold_herding.png"]);
    let mut ctx = assets.context(LOCAL_CHAIN_ID);
    ctx.upload_to_pinata = true;

    // Fail the first metadata upload, after both images are pinned
    let pinning = FakePinning::failing_at(2);
    let backend = FakeBackend::default();
    let err = deploy_random_nft(&ctx, &backend, &pinning, &FakeVerifier::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Upload(_)));
    assert_eq!(pinning.call_count(), 2);
    assert!(backend.chain.lock().unwrap().deployments.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_verification_requires_live_network_and_key() -> Result<()> {
    let assets = Assets::new(&[]);

    // Live network without a key
    let verifier = FakeVerifier::default();
    let ctx = assets.context(GOERLI_CHAIN_ID);
    let report =
        deploy_random_nft(&ctx, &FakeBackend::default(), &FakePinning::default(), &verifier)
            .await?;
    assert_eq!(verifier.call_count(), 0);
    assert_eq!(report.verification, VerificationOutcome::Skipped);

    // Live network with an empty key, as set by `ETHERSCAN_API_KEY=`
    for empty in ["", "  "] {
        let mut ctx = assets.context(GOERLI_CHAIN_ID);
        ctx.etherscan_api_key = Some(empty.to_string());
        let report =
            deploy_random_nft(&ctx, &FakeBackend::default(), &FakePinning::default(), &verifier)
                .await?;
        assert_eq!(report.verification, VerificationOutcome::Skipped);
    }
    assert_eq!(verifier.call_count(), 0);

    // Live network with a key
    let mut ctx = assets.context(GOERLI_CHAIN_ID);
    ctx.etherscan_api_key = Some("KEY".to_string());
    let report =
        deploy_random_nft(&ctx, &FakeBackend::default(), &FakePinning::default(), &verifier)
            .await?;
    assert_eq!(
        verifier.calls.lock().unwrap().clone(),
        vec![(report.deployment.address, "KEY".to_string())]
    );
    assert_eq!(report.verification, VerificationOutcome::Verified);
    assert!(report.stages.contains(&DeployStage::Verified));

    Ok(())
}

#[tokio::test]
async fn test_verification_failure_keeps_deployment() -> Result<()> {
    let assets = Assets::new(&[]);
    let mut ctx = assets.context(GOERLI_CHAIN_ID);
    ctx.etherscan_api_key = Some("KEY".to_string());

    let verifier = FakeVerifier::failing();
    let report =
        deploy_random_nft(&ctx, &FakeBackend::default(), &FakePinning::default(), &verifier)
            .await?;

    assert_eq!(verifier.call_count(), 1);
    assert!(matches!(report.verification, VerificationOutcome::Failed(_)));
    assert_eq!(report.deployment.address, Address::repeat_byte(0xa0));
    assert_eq!(
        report.stages[report.stages.len() - 2..],
        [DeployStage::VerificationFailed, DeployStage::Done]
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_network_is_missing_config() -> Result<()> {
    let assets = Assets::new(&[]);
    let ctx = assets.context(1);
    let backend = FakeBackend::default();

    let err = deploy_random_nft(
        &ctx,
        &backend,
        &FakePinning::default(),
        &FakeVerifier::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::MissingConfig(_)));
    assert!(backend.chain.lock().unwrap().deployments.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_mock_deploy_failure_is_fatal() -> Result<()> {
    let assets = Assets::new(&[]);
    let ctx = assets.context(LOCAL_CHAIN_ID);
    let backend = FakeBackend::reverting("VRFCoordinatorV2Mock");

    let err = deploy_random_nft(
        &ctx,
        &backend,
        &FakePinning::default(),
        &FakeVerifier::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::MockProvision(_)));
    assert!(backend.chain.lock().unwrap().deployments.is_empty());
    Ok(())
}
