//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{ConfigOverrides, Environment, LogLevel};
use crate::infrastructure::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "batchmint")]
#[command(about = "Batchmint - resumable batch NFT minting", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint one NFT per target
    Mint(MintArgs),

    /// Read or edit the persisted configuration
    Config(ConfigArgs),
}

/// Arguments for `batchmint mint`
#[derive(Args, Debug)]
pub struct MintArgs {
    /// Metadata URIs, metadata files, or folders of metadata files
    pub targets: Vec<String>,

    /// Retry cache file; successful entries are skipped and results are written back after every target
    #[arg(short, long, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Make a single mint attempt per target
    #[arg(long)]
    pub no_retry: bool,

    /// JSON file containing an array of target strings, appended after TARGETS
    #[arg(short, long, value_name = "FILE")]
    pub list: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Also write JSON logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Per-run overrides of the persisted configuration
#[derive(Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Config file to read
    #[arg(long = "config", value_name = "FILE", env = "BATCHMINT_CONFIG")]
    pub config_path: Option<PathBuf>,

    /// Signing keypair file
    #[arg(short, long, value_name = "FILE", env = "BATCHMINT_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Endpoint URL, overriding the one configured for the environment
    #[arg(short = 'u', long, value_name = "URL", env = "BATCHMINT_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Network environment (mainnet-beta, devnet, testnet, localnet)
    #[arg(short, long, env = "BATCHMINT_ENV")]
    pub env: Option<Environment>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BATCHMINT_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            config_path: args.config_path,
            keypair: args.keypair,
            rpc_url: args.rpc_url,
            log_level: args.log_level,
            env: args.env,
        }
    }
}

/// Arguments for `batchmint config`
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file to operate on
    #[arg(long = "config", value_name = "FILE", env = "BATCHMINT_CONFIG", global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show every configured value
    List,

    /// Show one value (env, logLevel, keypair, rpcUrl, rpcUrl.<env>)
    Get {
        key: String,
    },

    /// Set one value (env, logLevel, keypair, rpcUrl.<env>)
    Set {
        key: String,
        value: String,
    },
}
