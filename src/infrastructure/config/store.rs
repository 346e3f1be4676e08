//! Administrative access to the persisted config file (`batchmint config`).

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::loader::{validate_rpc_url, ConfigError, ConfigLoader};
use crate::domain::models::config::{Environment, LogLevel, PersistedConfig};

/// A key addressable through `config get` / `config set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Env,
    LogLevel,
    Keypair,
    /// The whole environment-to-URL map (read only)
    RpcUrl,
    /// `rpcUrl.<env>`
    RpcUrlFor(Environment),
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            None => match s {
                "env" => Ok(Self::Env),
                "logLevel" => Ok(Self::LogLevel),
                "keypair" => Ok(Self::Keypair),
                "rpcUrl" => Ok(Self::RpcUrl),
                _ => Err(ConfigError::UnknownKey(s.to_string())),
            },
            Some(("rpcUrl", env)) => env
                .parse::<Environment>()
                .map(Self::RpcUrlFor)
                .map_err(ConfigError::InvalidEnvironment),
            Some(_) => Err(ConfigError::UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => f.write_str("env"),
            Self::LogLevel => f.write_str("logLevel"),
            Self::Keypair => f.write_str("keypair"),
            Self::RpcUrl => f.write_str("rpcUrl"),
            Self::RpcUrlFor(env) => write!(f, "rpcUrl.{env}"),
        }
    }
}

/// Reads and edits the config file in place
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PersistedConfig, ConfigError> {
        ConfigLoader::load_from_file(&self.path)
    }

    /// Current value of `key`, `Value::Null` when unset
    pub fn get(&self, key: ConfigKey) -> Result<Value, ConfigError> {
        let config = self.load()?;
        let string_or_null =
            |v: Option<String>| v.map_or(Value::Null, Value::String);

        Ok(match key {
            ConfigKey::Env => string_or_null(config.env),
            ConfigKey::LogLevel => string_or_null(config.log_level),
            ConfigKey::Keypair => {
                string_or_null(config.keypair.map(|p| p.display().to_string()))
            }
            ConfigKey::RpcUrl => Value::Object(
                config
                    .rpc_url
                    .into_iter()
                    .map(|(env, url)| (env, Value::String(url)))
                    .collect(),
            ),
            ConfigKey::RpcUrlFor(env) => {
                string_or_null(config.rpc_url_for(env).map(str::to_string))
            }
        })
    }

    /// Validate `value` for `key` and write it back to the file
    pub fn set(&self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;

        match key {
            ConfigKey::Env => {
                let env = value
                    .parse::<Environment>()
                    .map_err(ConfigError::InvalidEnvironment)?;
                config.env = Some(env.to_string());
            }
            ConfigKey::LogLevel => {
                let level = value
                    .parse::<LogLevel>()
                    .map_err(ConfigError::InvalidLogLevel)?;
                config.log_level = Some(level.to_string());
            }
            ConfigKey::Keypair => config.keypair = Some(PathBuf::from(value)),
            ConfigKey::RpcUrl => {
                return Err(ConfigError::UnknownKey(
                    "rpcUrl (set a single environment, e.g. rpcUrl.devnet)".to_string(),
                ))
            }
            ConfigKey::RpcUrlFor(env) => {
                validate_rpc_url(value)?;
                config.rpc_url.insert(env.to_string(), value.to_string());
            }
        }

        ConfigLoader::write(&self.path, &config)?;
        tracing::debug!(key = %key, path = %self.path.display(), "config updated");
        Ok(())
    }

    /// Every set key with its value, nested URLs flattened to `rpcUrl.<env>`
    pub fn list(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let config = self.load()?;
        let mut entries = Vec::new();

        if let Some(env) = config.env {
            entries.push((ConfigKey::Env.to_string(), env));
        }
        if let Some(level) = config.log_level {
            entries.push((ConfigKey::LogLevel.to_string(), level));
        }
        if let Some(keypair) = config.keypair {
            entries.push((ConfigKey::Keypair.to_string(), keypair.display().to_string()));
        }
        for (env, url) in config.rpc_url {
            entries.push((format!("rpcUrl.{env}"), url));
        }

        Ok(entries)
    }
}
