//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, ConfigArgs, ConfigCommands, MintArgs, OverrideArgs};

/// Report a fatal error and exit with status 1
///
/// The full `anyhow` context chain is printed so the underlying cause
/// (missing keypair, unreadable list file, ...) is visible.
#[allow(clippy::print_stderr)]
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": chain.get(1..).unwrap_or_default(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
