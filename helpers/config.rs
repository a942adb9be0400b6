//! Deployment configuration and its defaults

use std::{path::PathBuf, time::Duration};

use num::BigUint;

/// Node endpoint used when none is given
pub const DEFAULT_CHAIN_ENDPOINT: &str = "ws://localhost:9944";
pub const DEFAULT_DECIMALS: u8 = 18;
/// Well-known development account derived from the public dev phrase
pub const DEFAULT_DEPLOYER_URI: &str = "//Alice";
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1;
/// Environment variable read when `--deployerUri` is not passed
pub const DEPLOYER_URI_ENV: &str = "BHC_DEPLOYER_URI";

// Gas ceiling for the instantiation, used as the weight's ref_time
pub const GAS_LIMIT: u64 = 4_000_000_000;
// 1 MiB of proof size for Weight v2 runtimes
pub const DEFAULT_PROOF_SIZE_LIMIT: u64 = 1024 * 1024;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INCLUSION_TIMEOUT_SECS: u64 = 120;

/// Contract bundle location, relative to the executable's directory
pub const CONTRACT_ARTIFACT: &str = "fixtures/contracts/bhc22_contract.contract";

/// Everything needed for one `create-bhc22` run.
///
/// Built once from the command line and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub chain_endpoint: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: u8,
    pub deployer_uri: String,
    /// Supply in whole tokens, before scaling by `decimals`
    pub total_supply: BigUint,
    pub contract_path: PathBuf,
    /// `None` waits for the handshake indefinitely
    pub connect_timeout: Option<Duration>,
    /// `None` waits for block inclusion indefinitely
    pub inclusion_timeout: Option<Duration>,
    pub gas_limit: u64,
    pub proof_size_limit: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            chain_endpoint: DEFAULT_CHAIN_ENDPOINT.to_owned(),
            name: None,
            symbol: None,
            decimals: DEFAULT_DECIMALS,
            deployer_uri: DEFAULT_DEPLOYER_URI.to_owned(),
            total_supply: BigUint::from(DEFAULT_TOTAL_SUPPLY),
            contract_path: default_contract_path(),
            connect_timeout: timeout_from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            inclusion_timeout: timeout_from_secs(DEFAULT_INCLUSION_TIMEOUT_SECS),
            gas_limit: GAS_LIMIT,
            proof_size_limit: DEFAULT_PROOF_SIZE_LIMIT,
        }
    }
}

/// Resolve the bundled artifact next to the running executable
pub fn default_contract_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONTRACT_ARTIFACT)))
        .unwrap_or_else(|| PathBuf::from(CONTRACT_ARTIFACT))
}

/// Zero disables the timeout
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
