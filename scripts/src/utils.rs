//! Utilities for the deploy scripts.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
    str::FromStr,
};

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde_json::{Map, Value};

use crate::errors::DeployError;

/// The provider type used by the scripts, with the deployer's wallet attached
pub type Wallet = DynProvider<Ethereum>;

/// Sets up the client with which to deploy and call contracts, returning it
/// alongside the deployer address derived from the private key
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(Wallet, Address), DeployError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok((DynProvider::new(provider), deployer))
}

/// Read and parse a JSON file
pub fn get_json_from_file(file_path: &Path) -> Result<Value, DeployError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| DeployError::ReadFile(format!("{}: {}", file_path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| DeployError::ReadFile(format!("{}: {}", file_path.display(), e)))
}

/// Read a UTF-8 text file
pub fn read_text_file(file_path: &Path) -> Result<String, DeployError> {
    fs::read_to_string(file_path)
        .map_err(|e| DeployError::ReadFile(format!("{}: {}", file_path.display(), e)))
}

/// Record a deployed address in the deployments file, under the network &
/// contract name, creating the file if it doesn't exist
pub fn write_deployed_address(
    file_path: &Path,
    network: &str,
    contract_name: &str,
    address: Address,
) -> Result<(), DeployError> {
    let mut parsed_json = if file_path.exists() {
        get_json_from_file(file_path)?
    } else {
        Value::Object(Map::new())
    };

    let root = parsed_json.as_object_mut().ok_or_else(|| {
        DeployError::WriteFile(format!("{} is not a JSON object", file_path.display()))
    })?;
    let network_entry = root
        .entry(network)
        .or_insert_with(|| Value::Object(Map::new()));
    let network_entry = network_entry.as_object_mut().ok_or_else(|| {
        DeployError::WriteFile(format!(
            "{network} entry of {} is not a JSON object",
            file_path.display()
        ))
    })?;
    network_entry.insert(
        contract_name.to_string(),
        Value::String(format!("{address:#x}")),
    );

    let contents = serde_json::to_string_pretty(&parsed_json)
        .map_err(|e| DeployError::WriteFile(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| DeployError::WriteFile(e.to_string()))
}

/// Run a command, streaming its output, and map a non-zero exit to the given error
pub fn command_success_or(
    mut cmd: Command,
    to_err: impl Fn(String) -> DeployError,
    err_msg: &str,
) -> Result<(), DeployError> {
    cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    let status = cmd.status().map_err(|e| to_err(e.to_string()))?;

    if !status.success() {
        Err(to_err(format!("{err_msg} ({status})")))
    } else {
        Ok(())
    }
}
