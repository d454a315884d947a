// file: src/cli/args.rs
// version: 1.0.0
// guid: c0d4b6f7-8e1a-4f57-b9a7-c1d2e3f4a5b6

//! Command line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sandbox-shell")]
#[command(about = "Run cat and ls against a sandboxed filesystem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "YAML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        env = "SANDBOX_SHELL_ROOT",
        help = "Directory the filesystem is sandboxed to"
    )]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the text of one file
    Cat {
        /// Exactly one path is expected; anything else prints the usage line
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the entries of the sandbox root
    Ls,

    /// Read commands from stdin until it ends
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_collects_any_number_of_args() {
        let cli = Cli::parse_from(["sandbox-shell", "cat"]);
        assert!(matches!(cli.command, Commands::Cat { ref args } if args.is_empty()));

        let cli = Cli::parse_from(["sandbox-shell", "cat", "a.txt", "b.txt"]);
        match cli.command {
            Commands::Cat { args } => assert_eq!(args, vec!["a.txt", "b.txt"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["sandbox-shell", "ls", "--root", "/srv", "-v"]);
        assert!(matches!(cli.command, Commands::Ls));
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("/srv")));
    }
}
