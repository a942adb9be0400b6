//! Common helpers for deploying BHC assets to a contracts chain

pub mod artifact;
pub mod chain;
pub mod config;
pub mod error;
pub mod signer;
pub mod ss58;
pub mod token;
mod words;

pub use artifact::ContractBundle;
pub use chain::{deploy_token, ChainClient, DeployedContract, GasLimit};
pub use config::DeployConfig;
pub use error::DeployError;
pub use signer::deployer_keypair;
pub use token::TokenIdentity;
