use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Environment variable holding the optional GitHub bearer token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Name of the JSON field carrying each rule's contributor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorsField {
    Commiters,
    Contributors,
}

impl ContributorsField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributorsField::Commiters => "commiters",
            ContributorsField::Contributors => "contributors",
        }
    }
}

/// Everything a collection run needs. Every field has a default, so an
/// empty YAML document (or no document at all) yields a runnable config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    /// Local folder holding one subdirectory per rule.
    pub rules_folder: PathBuf,
    /// Path of the rules folder inside the hosted repository.
    /// Falls back to `rules_folder` when unset.
    pub repo_folder: Option<String>,
    pub output_file: PathBuf,
    pub rule_file: String,
    pub doc_file: String,
    /// Contributors are only resolved when both owner and repo are set.
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: String,
    pub host: String,
    pub api_base_url: String,
    pub contributors_field: ContributorsField,
    pub include_doc_link: bool,
    pub doc_link_field: String,
    /// Never read from or written to a config file; see [`TOKEN_ENV_VAR`].
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            rules_folder: PathBuf::from("rules"),
            repo_folder: None,
            output_file: PathBuf::from("rules.json"),
            rule_file: ".cursorrules".to_string(),
            doc_file: "README.md".to_string(),
            owner: Some("stacklok".to_string()),
            repo: Some("prompt-library".to_string()),
            branch: "main".to_string(),
            host: "github.com".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            contributors_field: ContributorsField::Commiters,
            include_doc_link: true,
            doc_link_field: "readme".to_string(),
            token: None,
        }
    }
}

impl CollectConfig {
    /// Defaults plus the token from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.token = token_from_env();
        config
    }

    /// Owner and repo, when both are configured and non-empty.
    pub fn repository(&self) -> Option<(&str, &str)> {
        match (self.owner.as_deref(), self.repo.as_deref()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Some((owner, repo))
            }
            _ => None,
        }
    }

    /// Rules folder as it appears in repository paths and links.
    pub fn repo_folder(&self) -> String {
        let folder = match &self.repo_folder {
            Some(folder) => folder.clone(),
            None => self.rules_folder.to_string_lossy().into_owned(),
        };
        folder.replace('\\', "/").trim_matches('/').to_string()
    }

    pub fn trace_loaded(&self) {
        info!(
            rules_folder = %self.rules_folder.display(),
            output_file = %self.output_file.display(),
            owner = self.owner.as_deref().unwrap_or("<unset>"),
            repo = self.repo.as_deref().unwrap_or("<unset>"),
            token_set = self.token.is_some(),
            "Loaded collect config"
        );
        debug!(
            rule_file = %self.rule_file,
            doc_file = %self.doc_file,
            branch = %self.branch,
            api_base_url = %self.api_base_url,
            contributors_field = self.contributors_field.as_str(),
            include_doc_link = self.include_doc_link,
            "Collect config details"
        );
    }
}

/// Reads [`TOKEN_ENV_VAR`], treating an empty value as unset.
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_prompt_library_layout() {
        let config = CollectConfig::default();
        assert_eq!(config.rules_folder, PathBuf::from("rules"));
        assert_eq!(config.output_file, PathBuf::from("rules.json"));
        assert_eq!(config.rule_file, ".cursorrules");
        assert_eq!(config.repository(), Some(("stacklok", "prompt-library")));
        assert_eq!(config.contributors_field.as_str(), "commiters");
        assert!(config.include_doc_link);
        assert!(config.token.is_none());
    }

    #[test]
    fn repository_requires_owner_and_repo() {
        let mut config = CollectConfig::default();
        config.repo = None;
        assert_eq!(config.repository(), None);

        config.repo = Some("prompt-library".into());
        config.owner = Some(String::new());
        assert_eq!(config.repository(), None);
    }

    #[test]
    fn repo_folder_normalises_separators() {
        let mut config = CollectConfig::default();
        config.rules_folder = PathBuf::from("data\\rules\\");
        assert_eq!(config.repo_folder(), "data/rules");

        config.repo_folder = Some("/rules/".into());
        assert_eq!(config.repo_folder(), "rules");
    }
}
