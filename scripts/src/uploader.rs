//! Uploading the RandomNFT images and their metadata to IPFS

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tracing::info;

use crate::{
    constants::{FALLBACK_TOKEN_URIS, FILE_NAME_DELIMITER, IMAGE_EXTENSION, IPFS_URI_PREFIX},
    errors::DeployError,
    pinning::{PinResponse, PinningService},
    types::TokenMetadata,
};

/// The traits encoded in an image's file name, `<name>_<personality>_<skill>.png`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTraits {
    /// The token name
    pub name: String,
    /// The personality trait, absent if the file name has too few fields
    pub personality: Option<String>,
    /// The skill trait, absent if the file name has too few fields
    pub skill: Option<String>,
}

/// Parse the traits out of an image file name
///
/// Only the first `.png` is stripped. Missing trailing fields are left
/// absent and extra fields are ignored, rather than rejecting the name.
pub fn parse_image_name(file_name: &str) -> ImageTraits {
    let stem = file_name.replacen(IMAGE_EXTENSION, "", 1);
    let mut fields = stem.split(FILE_NAME_DELIMITER).map(str::to_string);

    ImageTraits {
        name: fields.next().unwrap_or_default(),
        personality: fields.next(),
        skill: fields.next(),
    }
}

/// Render an IPFS content hash as an `ipfs://` URI
pub fn ipfs_uri(hash: &str) -> String {
    format!("{IPFS_URI_PREFIX}{hash}")
}

/// The pre-pinned token URIs used when uploading is disabled
pub fn fallback_token_uris() -> Vec<String> {
    FALLBACK_TOKEN_URIS.iter().map(|uri| uri.to_string()).collect()
}

/// List the files in the image directory, sorted by file name
pub fn list_images(images_dir: &Path) -> Result<Vec<PathBuf>, DeployError> {
    let entries = fs::read_dir(images_dir)
        .map_err(|e| DeployError::ReadFile(format!("{}: {}", images_dir.display(), e)))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DeployError::ReadFile(e.to_string()))?.path();
        if path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Pin every image in the directory, returning the pin responses alongside
/// the image file names, in the same order
pub async fn store_images<P: PinningService>(
    images_dir: &Path,
    pinning: &P,
) -> Result<Vec<(String, PinResponse)>, DeployError> {
    let images = list_images(images_dir)?;
    info!("Uploading {} images to IPFS...", images.len());

    let mut responses = Vec::with_capacity(images.len());
    for path in images {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("Working on {}...", file_name);
        let response = pinning.upload_file(&path).await?;
        responses.push((file_name, response));
    }

    Ok(responses)
}

/// Pin the images in the directory and one metadata document per image,
/// returning the metadata token URIs in image order
pub async fn upload_token_uris<P: PinningService>(
    images_dir: &Path,
    pinning: &P,
) -> Result<Vec<String>, DeployError> {
    let images = store_images(images_dir, pinning).await?;

    let mut token_uris = Vec::with_capacity(images.len());
    for (file_name, image) in images {
        let ImageTraits {
            name,
            personality,
            skill,
        } = parse_image_name(&file_name);
        let metadata = TokenMetadata::new(&name, ipfs_uri(&image.ipfs_hash), personality, skill);

        info!("Uploading {}...", metadata.name);
        let response = pinning.upload_json(&metadata).await?;
        token_uris.push(ipfs_uri(&response.ipfs_hash));
    }

    info!("Token URIs uploaded! They are: {}", token_uris.iter().join(", "));
    Ok(token_uris)
}
