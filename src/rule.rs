//! Rule loading: reads one rule directory into a [`RuleRecord`].

use std::collections::BTreeSet;
use std::fs;
use tracing::{debug, warn};

use crate::config::CollectConfig;
use crate::error::{CollectError, Result};

/// Deduplicated contributor logins for a single rule.
pub type ContributorSet = BTreeSet<String>;

/// One rule directory, as it will appear in the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub name: String,
    pub text: String,
    pub contributors: ContributorSet,
    pub documentation_link: Option<String>,
}

impl RuleRecord {
    pub fn with_contributors(mut self, contributors: ContributorSet) -> Self {
        self.contributors = contributors;
        self
    }
}

/// Loads the rule stored in `<rules_folder>/<name>`.
///
/// Returns `Ok(None)` and logs a warning when the directory has no rule
/// file. The returned record has no contributors yet.
pub fn load_rule(config: &CollectConfig, name: &str) -> Result<Option<RuleRecord>> {
    let rule_dir = config.rules_folder.join(name);
    let rule_path = rule_dir.join(&config.rule_file);

    if !rule_path.is_file() {
        warn!(
            rule = name,
            rule_file = %config.rule_file,
            "No rule file found in rule folder, skipping"
        );
        return Ok(None);
    }

    let text = fs::read_to_string(&rule_path).map_err(|e| CollectError::io(&rule_path, e))?;
    debug!(rule = name, bytes = text.len(), "Read rule file");

    let documentation_link = if rule_dir.join(&config.doc_file).is_file() {
        documentation_link(config, name)
    } else {
        None
    };

    Ok(Some(RuleRecord {
        name: name.to_string(),
        text,
        contributors: ContributorSet::new(),
        documentation_link,
    }))
}

/// Link to the rule's documentation file on the hosting platform, or `None`
/// when links are disabled or no repository is configured.
pub fn documentation_link(config: &CollectConfig, name: &str) -> Option<String> {
    if !config.include_doc_link {
        return None;
    }
    let (owner, repo) = config.repository()?;
    Some(format!(
        "https://{}/{}/{}/blob/{}/{}/{}/{}",
        config.host,
        owner,
        repo,
        config.branch,
        config.repo_folder(),
        name,
        config.doc_file
    ))
}

/// Repository-relative path of the rule file, always `/`-separated.
pub fn repository_path(config: &CollectConfig, name: &str) -> String {
    format!("{}/{}/{}", config.repo_folder(), name, config.rule_file).replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(root: &std::path::Path) -> CollectConfig {
        CollectConfig {
            rules_folder: root.to_path_buf(),
            repo_folder: Some("rules".into()),
            ..CollectConfig::default()
        }
    }

    #[test]
    fn loads_text_and_documentation_link() {
        let root = tempdir().unwrap();
        let dir = root.path().join("rust");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(".cursorrules"), "Prefer `?` over unwrap. ✓").unwrap();
        fs::write(dir.join("README.md"), "# Rust").unwrap();

        let record = load_rule(&config_for(root.path()), "rust")
            .unwrap()
            .expect("rule should load");

        assert_eq!(record.name, "rust");
        assert_eq!(record.text, "Prefer `?` over unwrap. ✓");
        assert!(record.contributors.is_empty());
        assert_eq!(
            record.documentation_link.as_deref(),
            Some("https://github.com/stacklok/prompt-library/blob/main/rules/rust/README.md")
        );
    }

    #[test]
    fn missing_rule_file_is_skipped() {
        let root = tempdir().unwrap();
        let dir = root.path().join("empty");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("README.md"), "docs only").unwrap();

        let record = load_rule(&config_for(root.path()), "empty").unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn no_documentation_file_means_no_link() {
        let root = tempdir().unwrap();
        let dir = root.path().join("go");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(".cursorrules"), "gofmt everything").unwrap();

        let record = load_rule(&config_for(root.path()), "go").unwrap().unwrap();
        assert_eq!(record.documentation_link, None);
    }

    #[test]
    fn documentation_link_respects_toggle_and_repository() {
        let mut config = CollectConfig::default();
        config.include_doc_link = false;
        assert_eq!(documentation_link(&config, "foo"), None);

        config.include_doc_link = true;
        config.owner = None;
        assert_eq!(documentation_link(&config, "foo"), None);
    }

    #[test]
    fn repository_path_uses_forward_slashes() {
        let mut config = CollectConfig::default();
        config.rules_folder = "prompts\\rules".into();
        assert_eq!(
            repository_path(&config, "foo"),
            "prompts/rules/foo/.cursorrules"
        );
    }
}
