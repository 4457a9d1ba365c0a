//! Per-network deployment parameters, keyed by chain ID

use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};

use crate::{
    constants::{DEFAULT_BLOCK_CONFIRMATIONS, DEVELOPMENT_CHAINS},
    errors::DeployError,
};

/// The deployment parameters of a single network
///
/// Values are kept in the textual form in which they are published (decimal
/// wei amounts, hex addresses) and parsed by the typed accessors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// The chain ID of the network
    pub chain_id: u64,
    /// The display name of the network
    pub name: &'static str,
    /// The ETH / USD price feed address
    pub eth_usd_price_feed: Option<&'static str>,
    /// The VRF coordinator address, absent where a mock is deployed instead
    pub vrf_coordinator_v2: Option<&'static str>,
    /// The VRF key hash selecting the maximum gas price of a request
    pub gas_lane: &'static str,
    /// The mint fee, in wei
    pub mint_fee: &'static str,
    /// The gas limit of the VRF fulfillment callback
    pub callback_gas_limit: &'static str,
    /// The VRF subscription ID, absent where a mock subscription is created instead
    pub subscription_id: Option<&'static str>,
    /// The number of confirmations to wait for after each deployment
    pub block_confirmations: Option<u64>,
}

/// The deployment parameters of every supported network
pub static NETWORK_CONFIGS: [NetworkConfig; 3] = [
    NetworkConfig {
        chain_id: 31337,
        name: "localhost",
        eth_usd_price_feed: Some("0x9326BFA02ADD2366b30bacB125260Af641031331"),
        vrf_coordinator_v2: None,
        // 30 gwei
        gas_lane: "0xd89b2bf150e3b9e13446986e571fb9cab24b13cea0a43ea20a6049a85cc807cc",
        mint_fee: "10000000000000000",
        callback_gas_limit: "500000",
        subscription_id: None,
        block_confirmations: None,
    },
    NetworkConfig {
        chain_id: 5,
        name: "goerli",
        eth_usd_price_feed: Some("0xD4a33860578De61DBAbDc8BFdb98FD742fA7028e"),
        vrf_coordinator_v2: Some("0x2Ca8E0C643bDe4C2E08ab1fA0da3401AdAD7734D"),
        gas_lane: "0x79d3d8832d904592c0bf9818b621522c988bb8b0c05cdc3b15aea1b6e8db0c15",
        mint_fee: "10000000000000000",
        callback_gas_limit: "500000",
        subscription_id: Some("1002"),
        block_confirmations: Some(6),
    },
    NetworkConfig {
        chain_id: 43113,
        name: "fuji",
        eth_usd_price_feed: None,
        vrf_coordinator_v2: Some("0x2eD832Ba664535e5886b75D64C46EB9a228C2610"),
        gas_lane: "0x354d2f95da55398f44b7cff77da56283d9c6c829a4bdf1bbcaf2ad6a4d081f61",
        mint_fee: "10000000000000000",
        callback_gas_limit: "1000000",
        subscription_id: Some("549"),
        block_confirmations: Some(6),
    },
];

/// Look up the deployment parameters of the network with the given chain ID
pub fn network_config(chain_id: u64) -> Result<&'static NetworkConfig, DeployError> {
    NETWORK_CONFIGS
        .iter()
        .find(|config| config.chain_id == chain_id)
        .ok_or_else(|| DeployError::MissingConfig(format!("no entry for chain ID {chain_id}")))
}

impl NetworkConfig {
    /// Whether this is a development network, on which contracts are never verified
    pub fn is_development(&self) -> bool {
        DEVELOPMENT_CHAINS.contains(&self.name)
    }

    /// The number of confirmations to wait for after each deployment
    pub fn block_confirmations(&self) -> u64 {
        self.block_confirmations.unwrap_or(DEFAULT_BLOCK_CONFIRMATIONS)
    }

    /// The mint fee, in wei
    pub fn mint_fee(&self) -> Result<U256, DeployError> {
        U256::from_str_radix(self.mint_fee, 10).map_err(|e| self.invalid("mintFee", e))
    }

    /// The VRF gas lane key hash
    pub fn gas_lane(&self) -> Result<B256, DeployError> {
        B256::from_str(self.gas_lane).map_err(|e| self.invalid("gasLane", e))
    }

    /// The gas limit of the VRF fulfillment callback
    pub fn callback_gas_limit(&self) -> Result<u32, DeployError> {
        self.callback_gas_limit
            .parse()
            .map_err(|e| self.invalid("callbackGasLimit", e))
    }

    /// The address of the live VRF coordinator
    pub fn vrf_coordinator(&self) -> Result<Address, DeployError> {
        let addr = self
            .vrf_coordinator_v2
            .ok_or_else(|| self.missing("vrfCoordinatorV2"))?;
        Address::from_str(addr).map_err(|e| self.invalid("vrfCoordinatorV2", e))
    }

    /// The ID of the pre-funded VRF subscription
    pub fn subscription_id(&self) -> Result<u64, DeployError> {
        self.subscription_id
            .ok_or_else(|| self.missing("subscriptionId"))?
            .parse()
            .map_err(|e| self.invalid("subscriptionId", e))
    }

    /// The error for a field absent from this network's entry
    fn missing(&self, field: &str) -> DeployError {
        DeployError::MissingConfig(format!("{} has no {}", self.name, field))
    }

    /// The error for a field of this network's entry which fails to parse
    fn invalid(&self, field: &str, err: impl ToString) -> DeployError {
        DeployError::MissingConfig(format!(
            "{} has an invalid {}: {}",
            self.name,
            field,
            err.to_string()
        ))
    }
}
