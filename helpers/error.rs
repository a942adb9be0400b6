use std::{path::PathBuf, time::Duration};

use num::BigUint;
use thiserror::Error;

/// Errors that can occur while preparing or submitting a token deployment
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("failed to read contract artifact {}: {source}", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("contract artifact is not valid JSON: {0}")]
    ArtifactJson(#[from] serde_json::Error),

    #[error("invalid contract artifact: {0}")]
    ArtifactFormat(String),

    #[error("constructor `{0}` not found in contract artifact")]
    ConstructorNotFound(String),

    #[error("constructor `{label}` expects {expected} arguments, got {provided}")]
    ConstructorArity {
        label: String,
        expected: usize,
        provided: usize,
    },

    #[error("failed to encode constructor argument `{arg}`: {reason}")]
    ArgumentEncoding { arg: String, reason: String },

    #[error("total supply {0} does not fit in a 128-bit balance")]
    SupplyOverflow(BigUint),

    #[error("invalid deployer URI: {0}")]
    InvalidDeployerUri(String),

    #[error("timed out after {timeout:?} connecting to {endpoint}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: subxt::Error,
    },

    #[error("runtime does not expose {pallet}::{call}")]
    MissingCall { pallet: String, call: String },

    #[error("transaction rejected by the node: {0}")]
    Rejected(String),

    #[error("transaction was not included within {0:?}")]
    InclusionTimeout(Duration),

    #[error("status subscription ended before the transaction was included")]
    SubscriptionClosed,

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("no Contracts::Instantiated event in block {0}")]
    MissingInstantiatedEvent(String),

    #[error("invalid SS58 address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Rpc(#[from] subxt::Error),
}
