//! Command-line entry point for rules-collector.
//!
//! The binary takes no required arguments: a bare run uses the built-in
//! defaults from [`CollectConfig`]. `--config` points at a YAML file of
//! overrides (see [`crate::load_config`]).
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::collect::collect_rules;
use crate::config::CollectConfig;
use crate::contributors::GitHubClient;
use crate::load_config::load_config;

/// Collect rule folders and their GitHub contributors into one JSON file.
#[derive(Parser, Debug, Default)]
#[clap(
    name = "rules-collector",
    version,
    about = "Collect rule folders and their GitHub contributors into a JSON document"
)]
pub struct Cli {
    /// Optional YAML file overriding the default settings
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Async CLI logic shared by main() and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("Collect run starting");

    let config = match cli.config {
        Some(path) => load_config(path)?,
        None => CollectConfig::from_env(),
    };
    config.trace_loaded();

    let client = GitHubClient::from_config(&config);
    if client.is_none() {
        tracing::warn!("No GitHub owner/repo configured, contributors will be empty");
    }

    match collect_rules(&config, client.as_ref()).await {
        Ok(report) => {
            for name in &report.skipped {
                println!("Warning: no {} file found in {} folder.", config.rule_file, name);
            }
            println!(
                "Rules data collected and saved to {} ({} rules).",
                report.output_file.display(),
                report.rules_written
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Rules collection failed");
            Err(anyhow::Error::new(e).context("Rules collection failed"))
        }
    }
}
