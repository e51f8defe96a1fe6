//! notica binary entry point.
//!
//! Parses flags, initializes logging, resolves the merged configuration,
//! computes the activation set, and dispatches. Configuration errors abort
//! before anything is sent; dispatch errors are reported per service.

use anyhow::{Context, Result};
use clap::Parser;
use notica::cli::Cli;
use notica::config::{SearchPaths, configure};
use notica::dispatch::{ConsoleNotifier, dispatch};
use notica::services::enabled_services;
use std::fs::OpenOptions;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "off" => {
            // No logging
        }
        "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let flags = cli.flag_set();

    let mut paths = SearchPaths::discover();
    if let Some(config_path) = &cli.config {
        paths = paths.explicit(config_path);
    }

    let settings = configure(&paths, flags.clone()).context("failed to resolve configuration")?;
    if let Some(path) = settings.config_path() {
        debug!(path = %path.display(), "using config file");
    }

    let services = enabled_services(&settings, &flags);
    if services.is_empty() {
        info!("no notification services enabled; nothing to send");
        return Ok(());
    }
    debug!(?services, "dispatching");

    let failures = dispatch(&ConsoleNotifier, &services, &settings);
    for (service, err) in &failures {
        eprintln!("notica: {service}: {err}");
    }
    if failures.len() == services.len() {
        anyhow::bail!("all {} notification service(s) failed", services.len());
    }

    Ok(())
}
