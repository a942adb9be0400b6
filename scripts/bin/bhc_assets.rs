//! `bhc-assets`: create BHC assets on a contracts chain
//!
//! Run with: cargo run --bin bhc-assets -- create-bhc22 --totalSupply 5 --decimals 2

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{
    parser::ValueSource, ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand,
};
use colored::Colorize;
use log::{debug, info, warn};
use num::BigUint;

use helpers::{
    config::{
        default_contract_path, timeout_from_secs, DEFAULT_CHAIN_ENDPOINT,
        DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DECIMALS, DEFAULT_DEPLOYER_URI,
        DEFAULT_INCLUSION_TIMEOUT_SECS, DEFAULT_PROOF_SIZE_LIMIT, DEPLOYER_URI_ENV, GAS_LIMIT,
    },
    deploy_token, deployer_keypair,
    signer::is_dev_uri,
    ChainClient, ContractBundle, DeployConfig, TokenIdentity,
};

#[derive(Parser, Debug)]
#[command(name = "bhc-assets", version, about = "Manage BHC assets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a BHC22 asset
    #[command(name = "create-bhc22")]
    CreateBhc22(CreateBhc22Args),
}

#[derive(Args, Debug)]
struct CreateBhc22Args {
    /// Chain endpoint
    #[arg(long = "chainEndpoint", default_value = DEFAULT_CHAIN_ENDPOINT)]
    chain_endpoint: String,

    /// Name of token, generated when omitted
    #[arg(long)]
    name: Option<String>,

    /// Symbol of token, initials of the name when omitted
    #[arg(long)]
    symbol: Option<String>,

    /// Decimals of token
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: u8,

    /// Deployer secret URI
    #[arg(
        long = "deployerUri",
        env = DEPLOYER_URI_ENV,
        default_value = DEFAULT_DEPLOYER_URI,
        hide_env_values = true
    )]
    deployer_uri: String,

    /// Total supply in whole tokens, scaled by decimals
    #[arg(long = "totalSupply", default_value = "1", value_parser = parse_supply)]
    total_supply: BigUint,

    /// Contract bundle, defaults to the one shipped next to the executable
    #[arg(long)]
    contract: Option<PathBuf>,

    /// Seconds to wait for the node handshake (0 waits forever)
    #[arg(long = "connectTimeout", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout: u64,

    /// Seconds to wait for block inclusion (0 waits forever)
    #[arg(long = "inclusionTimeout", default_value_t = DEFAULT_INCLUSION_TIMEOUT_SECS)]
    inclusion_timeout: u64,

    /// Proof size limit of the instantiation weight
    #[arg(long = "proofSizeLimit", default_value_t = DEFAULT_PROOF_SIZE_LIMIT)]
    proof_size_limit: u64,
}

impl From<CreateBhc22Args> for DeployConfig {
    fn from(args: CreateBhc22Args) -> Self {
        Self {
            chain_endpoint: args.chain_endpoint,
            name: args.name,
            symbol: args.symbol,
            decimals: args.decimals,
            deployer_uri: args.deployer_uri,
            total_supply: args.total_supply,
            contract_path: args.contract.unwrap_or_else(default_contract_path),
            connect_timeout: timeout_from_secs(args.connect_timeout),
            inclusion_timeout: timeout_from_secs(args.inclusion_timeout),
            gas_limit: GAS_LIMIT,
            proof_size_limit: args.proof_size_limit,
        }
    }
}

fn parse_supply(value: &str) -> Result<BigUint, String> {
    value
        .parse()
        .map_err(|_| format!("`{value}` is not a non-negative integer"))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage errors exit 1 like every other failure; --help and --version exit 0
    let matches = match Cli::command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Printed regardless of RUST_LOG
            eprintln!("{} {err:#}", "Error:".red());
            debug!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(matches: ArgMatches) -> Result<()> {
    let cli = Cli::from_arg_matches(&matches)?;

    match cli.command {
        Command::CreateBhc22(args) => {
            let seed_on_command_line = matches
                .subcommand_matches("create-bhc22")
                .is_some_and(|sub| passed_on_command_line(sub, "deployer_uri"));
            if seed_on_command_line && !is_dev_uri(&args.deployer_uri) {
                warn!(
                    "Deployer seed passed with --deployerUri may be visible to other users \
                     and in shell history, prefer {DEPLOYER_URI_ENV}"
                );
            }
            create_bhc22(args.into()).await
        }
    }
}

fn passed_on_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

async fn create_bhc22(config: DeployConfig) -> Result<()> {
    // Nothing touches the network until the artifact is known to be readable
    let bundle =
        ContractBundle::load(&config.contract_path).context("Failed to load BHC22 contract")?;
    if let (Some(name), Some(version)) = (&bundle.name, &bundle.version) {
        info!("Using contract {name} {version}");
    }

    println!("{}", "Initializing Chain API...".blue());
    let client = ChainClient::connect(&config.chain_endpoint, config.connect_timeout).await?;
    println!("{}", "Chain API Initialized...".blue());

    let deployer = deployer_keypair(&config.deployer_uri)?;
    info!("Deploying as {}", client.address_of(&deployer.public_key().0));

    let token = TokenIdentity::resolve(
        config.name.as_deref(),
        config.symbol.as_deref(),
        config.decimals,
        &config.total_supply,
        &mut rand::rng(),
    );

    println!();
    println!("{}", format!("Token name: {}", token.name).blue());
    println!("{}", format!("Token symbol: {}", token.symbol).blue());
    println!("{}", format!("Token decimals: {}", token.decimals).blue());
    debug!("Token supply: {} base units", token.supply);

    println!();
    println!("{}", "Deploying token...".blue());
    let contract = deploy_token(&client, &deployer, &bundle, &token, &config)
        .await
        .context("Failed to deploy BHC22 contract")?;
    debug!(
        "Contract included in block {:?} by extrinsic {:?}",
        contract.block_hash, contract.extrinsic_hash
    );

    println!("{}", format!("Contract deployed at {}", contract.address).blue());
    Ok(())
}
