//! Shared setup for end-to-end tests against a running contracts node
//!
//! Point `BHC_TEST_ENDPOINT` at the node (default `ws://localhost:9944`) and
//! `BHC_TEST_ARTIFACT` at a built `bhc22_contract.contract`, then run
//! `cargo test -p tests -- --ignored`.

use std::{path::PathBuf, time::Duration};

use helpers::{
    config::DEFAULT_CHAIN_ENDPOINT, deploy_token, deployer_keypair, ChainClient, ContractBundle,
    DeployConfig, DeployedContract, TokenIdentity,
};

pub const ENDPOINT_ENV: &str = "BHC_TEST_ENDPOINT";
pub const ARTIFACT_ENV: &str = "BHC_TEST_ARTIFACT";

/// Test setup: a live chain session plus the contract to deploy
pub struct TestSetup {
    pub client: ChainClient,
    pub bundle: ContractBundle,
}

pub fn test_config() -> anyhow::Result<DeployConfig> {
    let chain_endpoint =
        std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_CHAIN_ENDPOINT.to_owned());
    let contract_path = std::env::var(ARTIFACT_ENV)
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("{ARTIFACT_ENV} must point at a built BHC22 bundle"))?;

    Ok(DeployConfig {
        chain_endpoint,
        contract_path,
        connect_timeout: Some(Duration::from_secs(10)),
        inclusion_timeout: Some(Duration::from_secs(60)),
        ..Default::default()
    })
}

pub async fn setup(config: &DeployConfig) -> anyhow::Result<TestSetup> {
    let bundle = ContractBundle::load(&config.contract_path)?;
    let client = ChainClient::connect(&config.chain_endpoint, config.connect_timeout).await?;
    Ok(TestSetup { client, bundle })
}

/// Run the same pipeline as `create-bhc22` and hand back what was deployed
pub async fn deploy(
    setup: &TestSetup,
    config: &DeployConfig,
) -> anyhow::Result<(TokenIdentity, DeployedContract)> {
    let deployer = deployer_keypair(&config.deployer_uri)?;
    let token = TokenIdentity::resolve(
        config.name.as_deref(),
        config.symbol.as_deref(),
        config.decimals,
        &config.total_supply,
        &mut rand::rng(),
    );
    let contract = deploy_token(&setup.client, &deployer, &setup.bundle, &token, config).await?;
    Ok((token, contract))
}
