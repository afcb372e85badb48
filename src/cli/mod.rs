//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run batches of HTTP requests concurrently
#[derive(Parser, Debug)]
#[command(name = "parallel-manager")]
#[command(author = "hephaex@gmail.com")]
#[command(version)]
#[command(about = "Run a batch of HTTP requests in parallel and wait for all of them")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a batch file
    Run(RunArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Batch file listing the requests (YAML or JSON)
    pub batch: PathBuf,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Reactor worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of times to run the batch with the same manager
    #[arg(short, long, default_value = "1")]
    pub repeat: u32,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Save the last report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show environment variable help
    #[arg(long)]
    pub env_help: bool,

    /// Write the effective configuration to this path
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let args = Args::parse_from([
            "parallel-manager",
            "run",
            "batch.yaml",
            "--format",
            "json",
            "--repeat",
            "3",
            "-v",
        ]);

        assert!(args.verbose);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.batch, PathBuf::from("batch.yaml"));
                assert_eq!(run.format.as_deref(), Some("json"));
                assert_eq!(run.repeat, 3);
                assert!(run.timeout.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config() {
        let args = Args::parse_from(["parallel-manager", "--config", "pm.yaml", "config"]);
        assert_eq!(args.config, Some(PathBuf::from("pm.yaml")));
        assert!(matches!(args.command, Command::Config(_)));
    }
}
