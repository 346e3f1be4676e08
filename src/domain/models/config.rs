use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Named network environments a mint run can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Environment {
    /// All known environments, in display order
    pub const ALL: [Self; 4] = [Self::MainnetBeta, Self::Devnet, Self::Testnet, Self::Localnet];

    /// Canonical name used in the config file and on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Localnet => "localnet",
        }
    }

    /// Well-known public endpoint, used when no URL is configured
    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }

    fn allowed() -> String {
        Self::ALL.iter().map(|e| e.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| format!("unknown environment '{s}' (expected one of: {})", Self::allowed()))
    }
}

/// Log severities accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// All levels, most verbose first
    pub const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Lowercase name as written in the config file
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL.into_iter().find(|l| l.as_str() == lowered).ok_or_else(|| {
            format!(
                "unknown log level '{s}' (expected one of: {})",
                Self::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>().join(", ")
            )
        })
    }
}

/// Contents of the persisted JSON config file
///
/// Enumerated values are kept as raw strings here and parsed during
/// resolution, so a bad value surfaces as a config error naming the
/// accepted set rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    /// Selected network environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// Log verbosity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Path to the signing keypair file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypair: Option<PathBuf>,

    /// Endpoint URL keyed by environment name
    #[serde(default)]
    pub rpc_url: BTreeMap<String, String>,
}

impl PersistedConfig {
    /// Endpoint configured for `env`, if any
    pub fn rpc_url_for(&self, env: Environment) -> Option<&str> {
        self.rpc_url.get(env.as_str()).map(String::as_str)
    }
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            env: Some(Environment::Devnet.to_string()),
            log_level: Some(LogLevel::Info.to_string()),
            keypair: None,
            rpc_url: BTreeMap::new(),
        }
    }
}

/// Values supplied on the command line; each one wins over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub keypair: Option<PathBuf>,
    pub rpc_url: Option<String>,
    pub log_level: Option<LogLevel>,
    pub env: Option<Environment>,
}

/// Fully resolved execution parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigContext {
    pub env: Environment,
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub log_level: LogLevel,
}
