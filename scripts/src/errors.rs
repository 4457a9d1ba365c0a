//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// A network, or a field of a network's config, is absent from the config table
    MissingConfig(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading a local file
    ReadFile(String),
    /// Error writing a local file
    WriteFile(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error pinning a file or JSON record to IPFS
    Upload(String),
    /// Error provisioning the mock VRF coordinator
    MockProvision(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error verifying contract source
    Verification(String),
    /// The given tags did not select any deploy script
    NoScriptsSelected(String),
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::MissingConfig(s) => write!(f, "missing network config: {}", s),
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::ReadFile(s) => write!(f, "error reading file: {}", s),
            DeployError::WriteFile(s) => write!(f, "error writing file: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::Upload(s) => write!(f, "error uploading to IPFS: {}", s),
            DeployError::MockProvision(s) => write!(f, "error provisioning mocks: {}", s),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            DeployError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            DeployError::Verification(s) => write!(f, "error verifying contract: {}", s),
            DeployError::NoScriptsSelected(s) => write!(f, "no deploy scripts tagged {}", s),
        }
    }
}

impl Error for DeployError {}
