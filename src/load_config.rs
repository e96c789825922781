//! `load_config` module: reads an optional YAML file of overrides into a [`CollectConfig`].
//!
//! Every key is optional; missing keys keep their defaults. The GitHub token
//! is a secret and is only ever taken from the environment.
//!
//! ```yaml
//! rules_folder: rules
//! output_file: rules.json
//! owner: stacklok
//! repo: prompt-library
//! contributors_field: contributors
//! include_doc_link: false
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::config::{token_from_env, CollectConfig};

/// Loads a YAML config file and injects the token from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CollectConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .inspect_err(|e| {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
        })
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;

    let mut config = parse_config(&config_content).inspect_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
    })?;
    info!(config_path = ?path_ref, "Parsed config YAML successfully");

    config.token = token_from_env();
    Ok(config)
}

/// Parses YAML overrides on top of the defaults. An empty document is valid.
pub fn parse_config(content: &str) -> Result<CollectConfig> {
    if content.trim().is_empty() {
        return Ok(CollectConfig::default());
    }
    serde_yaml::from_str(content).context("Failed to parse config YAML")
}
