//! Loading compiled contract artifacts from disk

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy_primitives::Bytes;
use serde_json::Value;

use crate::{constants::ARTIFACT_EXTENSION, errors::DeployError, utils::get_json_from_file};

/// A directory of compiled contract artifacts, as emitted by Hardhat
/// (`artifacts/`) or Foundry (`out/`)
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the artifact of the given contract, searching the store recursively
    pub fn artifact_path(&self, contract_name: &str) -> Result<PathBuf, DeployError> {
        let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");
        find_file(&self.root, &file_name)?.ok_or_else(|| {
            DeployError::ArtifactParsing(format!(
                "no artifact for {contract_name} under {}",
                self.root.display()
            ))
        })
    }

    /// Load the creation bytecode of the given contract
    pub fn bytecode(&self, contract_name: &str) -> Result<Bytes, DeployError> {
        let path = self.artifact_path(contract_name)?;
        let artifact = get_json_from_file(&path)?;
        parse_bytecode(contract_name, &artifact)
    }
}

/// Extract the creation bytecode from a parsed artifact
///
/// Hardhat stores the bytecode as a hex string, Foundry as `{ "object": hex }`.
pub fn parse_bytecode(contract_name: &str, artifact: &Value) -> Result<Bytes, DeployError> {
    let hex = match &artifact["bytecode"] {
        Value::String(hex) => hex.as_str(),
        Value::Object(obj) => obj.get("object").and_then(Value::as_str).unwrap_or_default(),
        _ => "",
    };

    let bytecode =
        Bytes::from_str(hex).map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;
    if bytecode.is_empty() {
        return Err(DeployError::ArtifactParsing(format!(
            "{contract_name} artifact has no creation bytecode"
        )));
    }

    Ok(bytecode)
}

/// Depth-first search for a file with the given name beneath `dir`
fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>, DeployError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| DeployError::ReadFile(format!("{}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().is_some_and(|name| name == file_name) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}
