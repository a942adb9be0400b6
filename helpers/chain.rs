//! Chain session and contract instantiation

use std::{future::Future, time::Duration};

use futures::{Stream, StreamExt};
use log::{debug, info};
use rand::RngCore;
use scale_info::{PortableRegistry, TypeDef};
use subxt::{
    dynamic::Value,
    events::StaticEvent,
    ext::scale_decode::DecodeAsType,
    tx::{TxInBlock, TxStatus},
    utils::{AccountId32, H256},
    Metadata, OnlineClient, SubstrateConfig,
};
use subxt_signer::sr25519::Keypair;

use crate::{
    artifact::ContractBundle, config::DeployConfig, error::DeployError, ss58,
    token::TokenIdentity,
};

pub type ChainConfig = SubstrateConfig;

pub const CONTRACTS_PALLET: &str = "Contracts";
pub const INSTANTIATE_CALL: &str = "instantiate_with_code";
/// Constructor taking `(name, symbol, decimals, total_supply)`
pub const CONSTRUCTOR: &str = "new";
const SALT_LEN: usize = 32;

/// `Contracts::Instantiated { deployer, contract }`
#[derive(Debug, DecodeAsType)]
#[decode_as_type(crate_path = "subxt::ext::scale_decode")]
pub struct Instantiated {
    pub deployer: AccountId32,
    pub contract: AccountId32,
}

impl StaticEvent for Instantiated {
    const PALLET: &'static str = CONTRACTS_PALLET;
    const EVENT: &'static str = "Instantiated";
}

/// Weight ceiling for the instantiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasLimit {
    pub ref_time: u64,
    pub proof_size: u64,
}

/// A contract that made it into a block
#[derive(Debug, Clone)]
pub struct DeployedContract {
    /// SS58 address in the chain's own format
    pub address: String,
    pub account: [u8; 32],
    pub block_hash: H256,
    pub extrinsic_hash: H256,
}

/// What the deployer cares about in a transaction status update
#[derive(Debug)]
pub enum TxEvent<B> {
    /// Anything before inclusion: validated, broadcast, retracted...
    Pending(&'static str),
    Included(B),
    Rejected(String),
}

/// Status updates for a submitted extrinsic resolve to this once included
pub type InBlock = TxInBlock<ChainConfig, OnlineClient<ChainConfig>>;

fn classify(status: TxStatus<ChainConfig, OnlineClient<ChainConfig>>) -> TxEvent<InBlock> {
    match status {
        TxStatus::InBestBlock(block) | TxStatus::InFinalizedBlock(block) => {
            TxEvent::Included(block)
        }
        TxStatus::Error { message }
        | TxStatus::Invalid { message }
        | TxStatus::Dropped { message } => TxEvent::Rejected(message),
        TxStatus::Validated => TxEvent::Pending("validated"),
        TxStatus::Broadcasted { .. } => TxEvent::Pending("broadcast to peers"),
        TxStatus::NoLongerInBestBlock => TxEvent::Pending("retracted from best block"),
    }
}

/// Open session to a contracts node
pub struct ChainClient {
    api: OnlineClient<ChainConfig>,
    ss58_prefix: u16,
}

impl ChainClient {
    /// Connect to `endpoint`, giving up after `timeout` if one is set.
    ///
    /// Plain `ws://` endpoints are accepted since dev nodes rarely run TLS.
    pub async fn connect(endpoint: &str, timeout: Option<Duration>) -> Result<Self, DeployError> {
        let connecting = async {
            OnlineClient::<ChainConfig>::from_insecure_url(endpoint)
                .await
                .map_err(|source| DeployError::Connect {
                    endpoint: endpoint.to_owned(),
                    source,
                })
        };
        let api = bounded(connecting, timeout, |timeout| DeployError::ConnectTimeout {
            endpoint: endpoint.to_owned(),
            timeout,
        })
        .await?;

        let ss58_prefix = ss58_prefix(&api.metadata());
        info!(
            "Connected to {endpoint}: spec version {}, genesis {:?}, ss58 prefix {ss58_prefix}",
            api.runtime_version().spec_version,
            api.genesis_hash()
        );

        Ok(Self { api, ss58_prefix })
    }

    pub fn ss58_prefix(&self) -> u16 {
        self.ss58_prefix
    }

    pub fn address_of(&self, account: &[u8; 32]) -> String {
        ss58::encode(account, self.ss58_prefix)
    }

    /// Submit `Contracts::instantiate_with_code` and wait until it lands in a block.
    ///
    /// Exactly one transaction is submitted. The status subscription is
    /// dropped as soon as the transaction is included or rejected.
    pub async fn instantiate(
        &self,
        signer: &Keypair,
        code: &[u8],
        data: Vec<u8>,
        salt: Vec<u8>,
        gas: GasLimit,
        inclusion_timeout: Option<Duration>,
    ) -> Result<DeployedContract, DeployError> {
        let gas_limit = instantiate_gas_limit(&self.api.metadata(), gas)?;
        let call = subxt::dynamic::tx(
            CONTRACTS_PALLET,
            INSTANTIATE_CALL,
            vec![
                // value transferred to the new contract
                Value::u128(0),
                gas_limit,
                // storage_deposit_limit: None
                Value::unnamed_variant("None", Vec::<Value>::new()),
                Value::from_bytes(code),
                Value::from_bytes(data),
                Value::from_bytes(salt),
            ],
        );

        let progress = self
            .api
            .tx()
            .sign_and_submit_then_watch_default(&call, signer)
            .await?;
        let extrinsic_hash = progress.extrinsic_hash();
        info!("Submitted instantiation {extrinsic_hash:?}");

        let updates = progress.map(|status| status.map(classify));
        let in_block = bounded(
            await_inclusion(updates),
            inclusion_timeout,
            DeployError::InclusionTimeout,
        )
        .await?;

        let block_hash = in_block.block_hash();
        info!("Instantiation included in block {block_hash:?}");

        let events = in_block.wait_for_success().await.map_err(dispatch_outcome)?;

        let deployer = AccountId32::from(signer.public_key().0);
        let contract = instantiated_by(events.find::<Instantiated>(), &deployer)?
            .ok_or_else(|| DeployError::MissingInstantiatedEvent(format!("{block_hash:?}")))?;

        Ok(DeployedContract {
            address: self.address_of(&contract.0),
            account: contract.0,
            block_hash,
            extrinsic_hash,
        })
    }
}

/// Instantiate the token constructor with a fresh random salt, so repeated
/// runs with the same arguments create distinct contracts.
pub async fn deploy_token(
    client: &ChainClient,
    signer: &Keypair,
    bundle: &ContractBundle,
    token: &TokenIdentity,
    config: &DeployConfig,
) -> Result<DeployedContract, DeployError> {
    let data = bundle.encode_constructor(
        CONSTRUCTOR,
        vec![
            Value::string(&token.name),
            Value::string(&token.symbol),
            Value::u128(token.decimals.into()),
            Value::u128(token.supply_as_balance()?),
        ],
    )?;

    let mut salt = vec![0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let gas = GasLimit {
        ref_time: config.gas_limit,
        proof_size: config.proof_size_limit,
    };
    client
        .instantiate(signer, bundle.code(), data, salt, gas, config.inclusion_timeout)
        .await
}

/// Wait for the first terminal status update.
///
/// Updates before inclusion are ignored. The stream is dropped, and with it
/// the node subscription, once this future settles.
pub async fn await_inclusion<B, E, S>(updates: S) -> Result<B, DeployError>
where
    S: Stream<Item = Result<TxEvent<B>, E>>,
    E: Into<DeployError>,
{
    let mut updates = std::pin::pin!(updates);
    while let Some(update) = updates.next().await {
        match update.map_err(Into::into)? {
            TxEvent::Pending(stage) => debug!("Transaction {stage}"),
            TxEvent::Included(block) => return Ok(block),
            TxEvent::Rejected(reason) => return Err(DeployError::Rejected(reason)),
        }
    }
    Err(DeployError::SubscriptionClosed)
}

/// Runtime failures of an included extrinsic become `Dispatch`, anything
/// else is an RPC problem.
pub fn dispatch_outcome(err: subxt::Error) -> DeployError {
    match err {
        subxt::Error::Runtime(dispatch) => DeployError::Dispatch(dispatch.to_string()),
        other => DeployError::Rpc(other),
    }
}

/// The contract created by `deployer`. Nested instantiations in the same
/// extrinsic name the outer contract as their deployer and are skipped.
pub fn instantiated_by<I>(
    events: I,
    deployer: &AccountId32,
) -> Result<Option<AccountId32>, DeployError>
where
    I: IntoIterator<Item = Result<Instantiated, subxt::Error>>,
{
    for event in events {
        let event = event?;
        if event.deployer == *deployer {
            return Ok(Some(event.contract));
        }
    }
    Ok(None)
}

/// Shape the gas limit the way the runtime's `gas_limit` parameter expects:
/// a Weight v2 `{ ref_time, proof_size }` struct or a legacy scalar.
pub fn gas_limit_value(types: &PortableRegistry, type_id: u32, gas: GasLimit) -> Value {
    let ref_time = Value::u128(gas.ref_time.into());
    match types.resolve(type_id).map(|ty| &ty.type_def) {
        Some(TypeDef::Composite(composite))
            if composite
                .fields
                .iter()
                .any(|field| field.name.as_deref() == Some("ref_time")) =>
        {
            Value::named_composite([
                ("ref_time", ref_time),
                ("proof_size", Value::u128(gas.proof_size.into())),
            ])
        }
        Some(TypeDef::Composite(_)) => Value::unnamed_composite([ref_time]),
        _ => ref_time,
    }
}

fn instantiate_gas_limit(metadata: &Metadata, gas: GasLimit) -> Result<Value, DeployError> {
    let missing = || DeployError::MissingCall {
        pallet: CONTRACTS_PALLET.to_owned(),
        call: INSTANTIATE_CALL.to_owned(),
    };
    let call = metadata
        .pallet_by_name(CONTRACTS_PALLET)
        .and_then(|pallet| pallet.call_variant_by_name(INSTANTIATE_CALL))
        .ok_or_else(missing)?;
    let field = call
        .fields
        .iter()
        .find(|field| field.name.as_deref() == Some("gas_limit"))
        .ok_or_else(missing)?;
    Ok(gas_limit_value(metadata.types(), field.ty.id, gas))
}

fn ss58_prefix(metadata: &Metadata) -> u16 {
    metadata
        .pallet_by_name("System")
        .and_then(|pallet| pallet.constant_by_name("SS58Prefix"))
        .and_then(|constant| <[u8; 2]>::try_from(constant.value()).ok())
        .map(u16::from_le_bytes)
        .unwrap_or(ss58::DEFAULT_PREFIX)
}

async fn bounded<T, F>(
    future: F,
    limit: Option<Duration>,
    on_timeout: impl FnOnce(Duration) -> DeployError,
) -> Result<T, DeployError>
where
    F: Future<Output = Result<T, DeployError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| on_timeout(limit))?,
        None => future.await,
    }
}
