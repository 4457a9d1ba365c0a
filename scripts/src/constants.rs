//! Constants used in the deploy scripts

/// The chain ID of the local Hardhat / Anvil development network
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Names of networks on which contracts are never verified
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// The number of confirmations to wait for when a network does not specify one
pub const DEFAULT_BLOCK_CONFIRMATIONS: u64 = 1;

// -------------------------
// | VRF Coordinator Mock |
// -------------------------

/// The premium, in LINK wei, charged by the mock coordinator per request
pub const BASE_FEE: u128 = 250_000_000_000_000_000;

/// The LINK wei charged per unit of gas by the mock coordinator
pub const GAS_PRICE_LINK: u128 = 1_000_000_000;

/// The amount, in LINK wei, with which the mock subscription is funded
pub const FUND_AMOUNT: u128 = 1_000_000_000_000_000_000_000;

// ------------------
// | Contract Names |
// ------------------

/// The artifact name of the VRF-minted NFT contract
pub const RANDOM_NFT_CONTRACT: &str = "RandomNFT";

/// The artifact name of the SVG NFT contract
pub const SVG_NFT_CONTRACT: &str = "SvgNFT";

/// The artifact name of the VRF coordinator mock contract
pub const VRF_COORDINATOR_MOCK_CONTRACT: &str = "VRFCoordinatorV2Mock";

// ----------
// | Assets |
// ----------

/// The default directory holding the RandomNFT images
pub const DEFAULT_IMAGES_DIR: &str = "images/randomNft";

/// The default directory holding the SvgNFT images
pub const DEFAULT_SVG_DIR: &str = "images/svgNFT";

/// The file name of the daytime SVG image
pub const DAY_SVG_FILE: &str = "day.svg";

/// The file name of the nighttime SVG image
pub const NIGHT_SVG_FILE: &str = "night.svg";

/// The image extension stripped from file names before they are parsed
pub const IMAGE_EXTENSION: &str = ".png";

/// The delimiter between the fields of an image file name
pub const FILE_NAME_DELIMITER: char = '_';

/// The URI scheme prefixed to IPFS content hashes
pub const IPFS_URI_PREFIX: &str = "ipfs://";

/// The mint fee passed to the SvgNFT constructor, in wei
pub const SVG_NFT_MINT_FEE: &str = "10000000000000000";

/// Token URIs of metadata pinned ahead of time, used when uploading is not enabled
pub const FALLBACK_TOKEN_URIS: [&str; 5] = [
    "ipfs://QmWJcanVAhHkVAf5GDGrVHw283GJfongt6uXyDL5WdWGpv",
    "ipfs://QmayjTnrQEmGBXnXZGBSf9A6Xb2ShqYeoThLuHrSzAoQBb",
    "ipfs://QmX56yzbA6oSNkkqYV5om9T82p9fzPD9GNHgHfC5e3GBCB",
    "ipfs://QmdPC6FKj8Cehs2syRFQ2MATirUtK2Zn6NHphzZAhxU8Dp",
    "ipfs://Qmag4gyrFrUgLM6o6ragMMdt2haLM8hecN8XsDm2m5XExT",
];

// ----------
// | Pinata |
// ----------

/// The base URL of the Pinata pinning API
pub const PINATA_API_URL: &str = "https://api.pinata.cloud";

/// The Pinata endpoint for pinning a file
pub const PIN_FILE_ENDPOINT: &str = "/pinning/pinFileToIPFS";

/// The Pinata endpoint for pinning a JSON document
pub const PIN_JSON_ENDPOINT: &str = "/pinning/pinJSONToIPFS";

/// The header carrying the Pinata API key
pub const PINATA_API_KEY_HEADER: &str = "pinata_api_key";

/// The header carrying the Pinata API secret
pub const PINATA_SECRET_HEADER: &str = "pinata_secret_api_key";

// ---------------
// | Environment |
// ---------------

/// Enables uploading the RandomNFT images & metadata when set to `true`
pub const UPLOAD_TO_PINATA_ENV_VAR: &str = "UPLOAD_TO_PINATA";

/// The Etherscan API key, gating contract verification
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// The Pinata API key
pub const PINATA_API_KEY_ENV_VAR: &str = "PINATA_API_KEY";

/// The Pinata API secret
pub const PINATA_API_SECRET_ENV_VAR: &str = "PINATA_API_SECRET";

// ----------------
// | Verification |
// ----------------

/// The name of the Foundry command used to verify contracts
pub const FORGE_COMMAND: &str = "forge";

/// The `forge` subcommand which submits source for verification
pub const VERIFY_CONTRACT_COMMAND: &str = "verify-contract";

// ---------------
// | Deployments |
// ---------------

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a compiled contract artifact
pub const ARTIFACT_EXTENSION: &str = "json";
