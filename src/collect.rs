//! High-level pipeline: scan → load → resolve → write.
//!
//! [`collect_rules`] walks every rule directory in order, loads its rule
//! file, resolves the contributors of that file through a [`CommitHistory`]
//! and finally writes one JSON document.
//!
//! # Error Handling
//! A directory without a rule file is logged and skipped. Every other
//! failure returns immediately and nothing is written, so a failed run never
//! leaves a partial document behind.

use std::path::PathBuf;
use tracing::{error, info};

use crate::config::CollectConfig;
use crate::contributors::{resolve_contributors, CommitHistory};
use crate::error::Result;
use crate::output::{write_document, OutputDocument, OutputLayout};
use crate::rule::{load_rule, repository_path, ContributorSet};
use crate::scan::rule_directories;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectReport {
    pub output_file: PathBuf,
    pub rules_written: usize,
    /// Directories that had no rule file.
    pub skipped: Vec<String>,
}

/// Runs the full pipeline. `history` is `None` when no repository is
/// configured, in which case every rule gets an empty contributor list.
pub async fn collect_rules<H>(config: &CollectConfig, history: Option<&H>) -> Result<CollectReport>
where
    H: CommitHistory + ?Sized,
{
    info!(rules_folder = %config.rules_folder.display(), "Starting rules collection");
    let (document, skipped) = build_document(config, history).await?;
    write_document(&config.output_file, &document)?;

    info!(
        output_file = %config.output_file.display(),
        rules = document.len(),
        skipped = skipped.len(),
        "Rules data collected"
    );
    Ok(CollectReport {
        output_file: config.output_file.clone(),
        rules_written: document.len(),
        skipped,
    })
}

/// Builds the in-memory document without touching the output file.
/// Also returns the names of skipped directories.
pub async fn build_document<H>(
    config: &CollectConfig,
    history: Option<&H>,
) -> Result<(OutputDocument, Vec<String>)>
where
    H: CommitHistory + ?Sized,
{
    let mut document = OutputDocument::new(OutputLayout::from_config(config));
    let mut skipped = Vec::new();

    for name in rule_directories(&config.rules_folder)? {
        info!(rule = %name, "Processing rule");

        let Some(rule) = load_rule(config, &name)? else {
            skipped.push(name);
            continue;
        };

        let contributors = match history {
            Some(history) => {
                let file_path = repository_path(config, &name);
                resolve_contributors(history, &file_path)
                    .await
                    .inspect_err(|e| {
                        error!(rule = %name, error = %e, "Failed to resolve contributors");
                    })?
            }
            None => ContributorSet::new(),
        };

        document.push(rule.with_contributors(contributors));
    }

    Ok((document, skipped))
}
