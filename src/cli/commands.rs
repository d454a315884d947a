// file: src/cli/commands.rs
// version: 1.0.0
// guid: d1e5c7a8-9f2b-4a68-8cb8-d2e3f4a5b6c7

//! Command implementations for the CLI

use crate::{
    config::{loader::ConfigLoader, ShellConfig},
    fs::LocalFileSystem,
    programs::Program,
    shell::Shell,
};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{debug, info};

/// Build the effective configuration from an optional file and root override
pub fn resolve_config(config_path: Option<PathBuf>, root: Option<PathBuf>) -> Result<ShellConfig> {
    let mut config = match config_path {
        Some(path) => ConfigLoader::new()
            .load_shell_config(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ShellConfig::default(),
    };

    if let Some(root) = root {
        config.root = root;
    }

    debug!("Sandbox root: {}", config.root.display());
    Ok(config)
}

/// Print a file from the sandbox
pub async fn cat_command(config: &ShellConfig, args: Vec<String>) -> Result<()> {
    let mut argv = vec![Program::Cat.name().to_string()];
    argv.extend(args);

    run_program(config, Program::Cat, &argv).await
}

/// List the sandbox root
pub async fn ls_command(config: &ShellConfig) -> Result<()> {
    run_program(config, Program::Ls, &[Program::Ls.name().to_string()]).await
}

/// Run the interactive shell on stdin
pub async fn shell_command(config: ShellConfig) -> Result<()> {
    info!("Starting shell in {}", config.root.display());

    let host = LocalFileSystem::new(&config.root);
    let shell = Shell::new(host, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    shell
        .run(BufReader::new(tokio::io::stdin()), &mut out)
        .await
        .context("Shell terminated with an error")?;

    Ok(())
}

async fn run_program(config: &ShellConfig, program: Program, argv: &[String]) -> Result<()> {
    let stdout = io::stdout();
    run_program_to(config, program, argv, &mut stdout.lock()).await
}

/// Run `program` writing straight to `out`, unbuffered. Ctrl+C exits the
/// process without unwinding.
async fn run_program_to<W: Write>(
    config: &ShellConfig,
    program: Program,
    argv: &[String],
    out: &mut W,
) -> Result<()> {
    let host = LocalFileSystem::new(&config.root);

    program
        .run(argv, &host, config.batch_size_hint, out)
        .await
        .with_context(|| format!("{} failed", program.name()))?;
    out.flush()?;

    Ok(())
}
