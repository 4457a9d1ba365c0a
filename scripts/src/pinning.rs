//! A client for pinning files and JSON documents to IPFS through Pinata

use std::path::Path;

use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::{
    constants::{
        PINATA_API_KEY_HEADER, PINATA_API_URL, PINATA_SECRET_HEADER, PIN_FILE_ENDPOINT,
        PIN_JSON_ENDPOINT,
    },
    errors::DeployError,
    types::TokenMetadata,
};

/// The response to a successful pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinResponse {
    /// The content hash of the pinned data
    pub ipfs_hash: String,
    /// The size of the pinned data, in bytes
    #[serde(default)]
    pub pin_size: u64,
    /// When the data was pinned
    #[serde(default)]
    pub timestamp: String,
}

/// A service which stores content on IPFS and returns its content hash
#[allow(async_fn_in_trait)]
pub trait PinningService {
    /// Pin the file at the given path
    async fn upload_file(&self, path: &Path) -> Result<PinResponse, DeployError>;

    /// Pin a token metadata document
    async fn upload_json(&self, metadata: &TokenMetadata) -> Result<PinResponse, DeployError>;
}

/// API credentials for Pinata
#[derive(Debug, Clone)]
pub struct PinataCredentials {
    /// The API key
    pub api_key: String,
    /// The API secret
    pub api_secret: String,
}

/// A [`PinningService`] backed by the Pinata HTTP API
#[derive(Debug, Clone)]
pub struct PinataClient {
    /// The HTTP client
    http: Client,
    /// The base URL of the API
    base_url: String,
    /// The API credentials, checked on first upload
    credentials: Option<PinataCredentials>,
}

impl PinataClient {
    /// Create a client against the public Pinata API
    ///
    /// Credentials are only required once something is uploaded.
    pub fn new(api_key: Option<String>, api_secret: Option<String>) -> Self {
        let credentials = match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Some(PinataCredentials {
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Self {
            http: Client::new(),
            base_url: PINATA_API_URL.to_string(),
            credentials,
        }
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build an authenticated POST request to the given endpoint
    fn post(&self, endpoint: &str) -> Result<RequestBuilder, DeployError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            DeployError::Upload("Pinata API key and secret must both be set".to_string())
        })?;

        Ok(self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .header(PINATA_API_KEY_HEADER, &credentials.api_key)
            .header(PINATA_SECRET_HEADER, &credentials.api_secret))
    }
}

impl PinningService for PinataClient {
    async fn upload_file(&self, path: &Path) -> Result<PinResponse, DeployError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| DeployError::ReadFile(format!("{}: {}", path.display(), e)))?;

        let form = Form::new()
            .part("file", Part::bytes(contents).file_name(file_name.clone()))
            .text("pinataMetadata", json!({ "name": file_name }).to_string());

        debug!("pinning file {}", path.display());
        let response = self
            .post(PIN_FILE_ENDPOINT)?
            .multipart(form)
            .send()
            .await
            .map_err(|e| DeployError::Upload(e.to_string()))?;

        parse_pin_response(response).await
    }

    async fn upload_json(&self, metadata: &TokenMetadata) -> Result<PinResponse, DeployError> {
        let body = json!({
            "pinataContent": metadata,
            "pinataMetadata": { "name": metadata.name },
        });

        debug!("pinning metadata for {}", metadata.name);
        let response = self
            .post(PIN_JSON_ENDPOINT)?
            .json(&body)
            .send()
            .await
            .map_err(|e| DeployError::Upload(e.to_string()))?;

        parse_pin_response(response).await
    }
}

/// Parse a Pinata response, rejecting non-success statuses
async fn parse_pin_response(response: Response) -> Result<PinResponse, DeployError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeployError::Upload(format!("Pinata returned {status}: {body}")));
    }

    response
        .json::<PinResponse>()
        .await
        .map_err(|e| DeployError::Upload(e.to_string()))
}
