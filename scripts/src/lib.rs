//! Scripts for deploying the RandomNFT and SvgNFT contracts, along with the
//! VRF coordinator mock and IPFS assets they depend on.

#![deny(missing_docs)]

pub mod artifacts;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mocks;
pub mod pinning;
mod solidity;
pub mod types;
pub mod uploader;
pub mod utils;
pub mod verify;
