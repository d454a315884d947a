// file: src/main.rs
// version: 1.0.0
// guid: e2f6d8b9-0a3c-4b79-9dc9-e3f4a5b6c7d8

//! Sandbox shell - main entry point

use clap::Parser;
use sandbox_shell::{
    cli::{
        args::{Cli, Commands},
        commands::*,
    },
    logging::logger,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_logger(cli.verbose, cli.quiet)?;

    let config = resolve_config(cli.config, cli.root)?;
    let command = cli.command;

    let shutdown_signal = async {
        if signal::ctrl_c().await.is_err() {
            // No handler available; never resolve so the command runs to completion.
            std::future::pending::<()>().await;
        }
        warn!("Received Ctrl+C, stopping");
    };

    let command_future = async {
        match command {
            Commands::Cat { args } => cat_command(&config, args).await,
            Commands::Ls => ls_command(&config).await,
            Commands::Shell => shell_command(config.clone()).await,
        }
    };

    tokio::select! {
        result = command_future => result,
        _ = shutdown_signal => {
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
