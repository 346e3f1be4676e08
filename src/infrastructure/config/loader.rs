use figment::providers::{Format, Json};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::domain::models::config::{
    ConfigContext, ConfigOverrides, Environment, LogLevel, PersistedConfig,
};

/// File name of the persisted config inside its directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No keypair configured. Pass --keypair or run `batchmint config set keypair <path>`")]
    MissingKeypair,

    #[error("No environment configured. Pass --env or run `batchmint config set env <env>`")]
    MissingEnvironment,

    #[error("Invalid env: {0}")]
    InvalidEnvironment(String),

    #[error("Invalid logLevel: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid RPC URL '{0}': must be an absolute http(s) URL")]
    InvalidRpcUrl(String),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),
}

/// Default location of the config file
///
/// `<config dir>/batchmint/config.json`, falling back to a project-local
/// `.batchmint/config.json` when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("batchmint"))
        .unwrap_or_else(|| PathBuf::from(".batchmint"))
        .join(CONFIG_FILE_NAME)
}

/// Check that `url` is an absolute http(s) URL
pub fn validate_rpc_url(url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidRpcUrl(url.to_string())),
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the execution context for a run
    ///
    /// Precedence per field (highest first):
    /// 1. Command-line overrides (including their `BATCHMINT_*` env vars)
    /// 2. The persisted config file
    /// 3. Built-in defaults (`info` log level, the environment's public endpoint)
    ///
    /// Keypair and environment have no built-in default; if neither the
    /// overrides nor the file provide one the run cannot proceed.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<ConfigContext, ConfigError> {
        let path = overrides
            .config_path
            .clone()
            .unwrap_or_else(default_config_path);
        let persisted = Self::load_from_file(&path)?;
        let context = Self::merge(&persisted, overrides)?;

        debug!(config = %path.display(), env = %context.env, "configuration merged");
        Ok(context)
    }

    /// Load the persisted config, creating it with defaults on first use
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<PersistedConfig, ConfigError> {
        let path = path.as_ref();
        Self::ensure_exists(path)?;

        // Relative paths are searched upwards by figment; pin the exact file.
        let absolute = std::path::absolute(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // Built-in defaults are written once by `ensure_exists`; keys missing
        // from an existing file stay unset so resolution can reject them.
        Figment::from(Json::file(&absolute))
            .extract()
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source: Box::new(source),
            })
    }

    /// Write a default config file at `path` if nothing is there yet
    pub fn ensure_exists(path: &Path) -> Result<(), ConfigError> {
        match fs::metadata(path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "creating default config file");
                Self::write(path, &PersistedConfig::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persist `config` as pretty-printed JSON
    pub fn write(path: &Path, config: &PersistedConfig) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(config)
            .map_err(|err| write_err(std::io::Error::other(err)))?;
        fs::write(path, format!("{content}\n")).map_err(write_err)
    }

    /// Apply overrides on top of a persisted config
    pub fn merge(
        persisted: &PersistedConfig,
        overrides: &ConfigOverrides,
    ) -> Result<ConfigContext, ConfigError> {
        let keypair_path = overrides
            .keypair
            .clone()
            .or_else(|| persisted.keypair.clone())
            .ok_or(ConfigError::MissingKeypair)?;

        let env = match overrides.env {
            Some(env) => env,
            None => persisted
                .env
                .as_deref()
                .ok_or(ConfigError::MissingEnvironment)?
                .parse::<Environment>()
                .map_err(ConfigError::InvalidEnvironment)?,
        };

        let rpc_url = overrides
            .rpc_url
            .as_deref()
            .or_else(|| persisted.rpc_url_for(env))
            .unwrap_or_else(|| env.default_rpc_url())
            .to_string();
        validate_rpc_url(&rpc_url)?;

        let log_level = match overrides.log_level {
            Some(level) => level,
            None => persisted
                .log_level
                .as_deref()
                .map(str::parse::<LogLevel>)
                .transpose()
                .map_err(ConfigError::InvalidLogLevel)?
                .unwrap_or_default(),
        };

        Ok(ConfigContext {
            env,
            rpc_url,
            keypair_path,
            log_level,
        })
    }
}
