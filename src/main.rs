//! parallel-manager - run batches of HTTP requests concurrently
//!
//! Reads a batch file of requests, queues each one on a
//! [`ParallelManager`], and blocks until every request has completed.
//! `main` is synchronous on purpose: the manager starts a reactor for the
//! duration of each run and stops it afterwards.
//!
//! ## Usage
//!
//! ```bash
//! # Run a batch
//! parallel-manager run batch.yaml
//!
//! # JSON output, 5 second timeout, run the batch three times
//! parallel-manager run batch.yaml --format json --timeout 5 --repeat 3
//!
//! # Show effective configuration
//! parallel-manager config
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use parallel_manager::cli::{self, Args};
use parallel_manager::config::{print_env_help, AppConfig, EnvConfig};
use parallel_manager::executor::{ParallelManager, TokioReactor};
use parallel_manager::http::{Endpoint, HttpClient, HttpOutcome};
use parallel_manager::models::BatchFile;
use parallel_manager::output::{BatchReport, OutputFormat, ResultFormatter};
use parallel_manager::utils::logger::{init_logger, LogLevel};

fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let config_path = args
        .config
        .clone()
        .or_else(|| env.config_file.clone().map(Into::into));
    let config = AppConfig::discover(config_path.as_deref())?.apply_env(&env);

    let level = if args.verbose || env.verbose.unwrap_or(false) {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&config.log_level).unwrap_or(LogLevel::Info)
    };
    init_logger(level);

    match args.command {
        cli::Command::Run(run_args) => run_batch(run_args, config),
        cli::Command::Config(config_args) => show_config(config_args, &config, &env),
    }
}

fn run_batch(args: cli::RunArgs, mut config: AppConfig) -> Result<()> {
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(workers) = args.workers {
        config.worker_threads = workers;
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    config.validate()?;

    let format = OutputFormat::from_str(&config.format)
        .with_context(|| format!("Unknown output format: {}", config.format))?;
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let batch = BatchFile::load(&args.batch)?;
    if batch.is_empty() {
        warn!("Batch file {} has no requests", args.batch.display());
    }

    let client = HttpClient::from_config(&config)?;
    let reactor = TokioReactor::new().with_worker_threads(config.worker_threads);
    let mut manager = ParallelManager::with_reactor(reactor);

    let mut last_report = None;
    for round in 1..=args.repeat.max(1) {
        if args.repeat > 1 {
            info!("=== Round {}/{} ===", round, args.repeat);
        }

        for spec in &batch.requests {
            let endpoint = Arc::new(Endpoint::new(client.clone(), spec.url.clone()));
            let url = spec.url.clone();
            let method = spec.method;
            manager.add(endpoint, spec.method, spec.options(), move |out: &HttpOutcome| {
                match out {
                    Ok(resp) if resp.is_success() => {
                        info!("{} {} -> {}", method, url, resp.status_code)
                    }
                    Ok(resp) => warn!("{} {} -> {}", method, url, resp.status_code),
                    Err(e) => warn!("{} {} failed: {}", method, url, e),
                }
            });
        }

        let result = manager.run()?;
        let report = BatchReport::new(result, &batch.requests);
        println!("{}", formatter.format_report(&report));
        last_report = Some(report);
    }

    if let (Some(path), Some(report)) = (&args.output, &last_report) {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report saved to {}", path.display());
    }

    match last_report {
        Some(report) if report.failed > 0 => bail!("{} request(s) failed", report.failed),
        _ => Ok(()),
    }
}

fn show_config(args: cli::ConfigArgs, config: &AppConfig, env: &EnvConfig) -> Result<()> {
    if args.env_help {
        print_env_help();
        return Ok(());
    }

    println!(
        "{}",
        serde_yaml::to_string(config).context("Failed to serialize config")?
    );
    if env.has_any() {
        env.print_summary();
    }

    if let Some(path) = &args.save {
        config.save(path)?;
        println!("Configuration saved to {}", path.display());
    }

    Ok(())
}
