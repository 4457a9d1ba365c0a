//! Publishing contract source to a block explorer

use std::process::Command;

use tracing::{info, warn};

use crate::{
    constants::{FORGE_COMMAND, VERIFY_CONTRACT_COMMAND},
    errors::DeployError,
    types::{Deployment, DeploymentArguments, VerificationOutcome},
    utils::command_success_or,
};

/// A service which verifies deployed contracts against their source
#[allow(async_fn_in_trait)]
pub trait ContractVerifier {
    /// Verify the deployed contract, constructed with the given arguments
    async fn verify(
        &self,
        deployment: &Deployment,
        args: &DeploymentArguments,
        api_key: &str,
    ) -> Result<(), DeployError>;
}

/// A [`ContractVerifier`] which shells out to `forge verify-contract`
///
/// Assumes that `forge` is locally available and run from the contracts project.
#[derive(Debug, Clone, Copy)]
pub struct ForgeVerifier {
    /// The chain ID the contracts are deployed on
    chain_id: u64,
}

impl ForgeVerifier {
    /// Create a verifier for contracts on the given chain
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    /// Build the `forge verify-contract` command for a deployment
    pub fn command(
        &self,
        deployment: &Deployment,
        args: &DeploymentArguments,
        api_key: &str,
    ) -> Command {
        let mut cmd = Command::new(FORGE_COMMAND);
        cmd.arg(VERIFY_CONTRACT_COMMAND)
            .arg(format!("{:#x}", deployment.address))
            .arg(&deployment.contract_name)
            .arg("--chain")
            .arg(self.chain_id.to_string())
            .arg("--etherscan-api-key")
            .arg(api_key)
            .arg("--constructor-args")
            .arg(args.abi_encode_hex())
            .arg("--watch");
        cmd
    }
}

impl ContractVerifier for ForgeVerifier {
    async fn verify(
        &self,
        deployment: &Deployment,
        args: &DeploymentArguments,
        api_key: &str,
    ) -> Result<(), DeployError> {
        let cmd = self.command(deployment, args, api_key);
        tokio::task::spawn_blocking(move || {
            command_success_or(cmd, DeployError::Verification, "forge verify-contract failed")
        })
        .await
        .map_err(|e| DeployError::Verification(e.to_string()))?
    }
}

/// Verify a deployment if it is on a live network and a non-empty API key is
/// present
///
/// A failed verification is logged and reported, never escalated: the
/// contract stays deployed either way.
pub async fn maybe_verify<V: ContractVerifier>(
    verifier: &V,
    is_development: bool,
    api_key: Option<&str>,
    deployment: &Deployment,
    args: &DeploymentArguments,
) -> VerificationOutcome {
    let api_key = match api_key {
        Some(key) if !is_development && !key.trim().is_empty() => key,
        _ => return VerificationOutcome::Skipped,
    };

    info!("Verifying...");
    match verifier.verify(deployment, args, api_key).await {
        Ok(()) => VerificationOutcome::Verified,
        Err(e) => {
            warn!("verification of {} failed: {}", deployment.contract_name, e);
            VerificationOutcome::Failed(e.to_string())
        }
    }
}
