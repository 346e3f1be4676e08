//! Batchmint CLI entry point.

use clap::Parser;

use batchmint::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging is installed by `mint` once the configured level is known.
    let result = match cli.command {
        Commands::Mint(args) => batchmint::cli::commands::mint::execute(args, cli.json).await,
        Commands::Config(args) => batchmint::cli::commands::config::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        batchmint::cli::handle_error(err, cli.json);
    }
}
