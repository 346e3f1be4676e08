//! Implementation of the `batchmint config` command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::{ConfigArgs, ConfigCommands};
use crate::infrastructure::config::{default_config_path, ConfigKey, ConfigStore};

#[derive(Debug, Serialize)]
pub struct ConfigListOutput {
    pub path: PathBuf,
    pub values: serde_json::Map<String, serde_json::Value>,
    #[serde(skip)]
    entries: Vec<(String, String)>,
}

impl CommandOutput for ConfigListOutput {
    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return format!("No values set in {}", self.path.display());
        }
        format!(
            "{}\n{}",
            self.path.display(),
            TableFormatter::new().format_config(&self.entries)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigValueOutput {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<PathBuf>,
}

impl CommandOutput for ConfigValueOutput {
    fn to_human(&self) -> String {
        let value = match &self.value {
            serde_json::Value::Null => "(not set)".to_string(),
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        match &self.updated {
            Some(path) => format!("{} = {value} (saved to {})", self.key, path.display()),
            None => value,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ConfigArgs, json_mode: bool) -> Result<()> {
    let store = ConfigStore::new(args.config_path.unwrap_or_else(default_config_path));

    match args.command {
        ConfigCommands::List => {
            let entries = store.list().context("Failed to list configuration")?;
            let values = entries
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            let output_data = ConfigListOutput {
                path: store.path().to_path_buf(),
                values,
                entries,
            };
            output(&output_data, json_mode);
        }
        ConfigCommands::Get { key } => {
            let parsed: ConfigKey = key.parse()?;
            let value = store
                .get(parsed)
                .with_context(|| format!("Failed to read '{key}'"))?;
            output(
                &ConfigValueOutput {
                    key,
                    value,
                    updated: None,
                },
                json_mode,
            );
        }
        ConfigCommands::Set { key, value } => {
            let parsed: ConfigKey = key.parse()?;
            store
                .set(parsed, &value)
                .with_context(|| format!("Failed to set '{key}'"))?;
            let stored = store.get(parsed)?;
            output(
                &ConfigValueOutput {
                    key,
                    value: stored,
                    updated: Some(store.path().to_path_buf()),
                },
                json_mode,
            );
        }
    }

    Ok(())
}
