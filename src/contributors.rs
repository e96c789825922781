//! # contributors: who touched a rule file
//!
//! Resolves the set of GitHub logins that authored commits to a given file.
//!
//! The remote side is abstracted behind [`CommitHistory`] so the pagination
//! loop in [`resolve_contributors`] can be driven by the real
//! [`GitHubClient`] or by a `mockall` mock in tests.
//!
//! ## Protocol
//! - `GET {api_base_url}/repos/{owner}/{repo}/commits?path=..&page=..&per_page=100`
//! - Pages are requested from 1 upwards until one comes back empty.
//! - Any non-2xx status aborts the whole run. There is no retry.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use mockall::automock;

use crate::config::CollectConfig;
use crate::error::{CollectError, Result};
use crate::rule::ContributorSet;

/// Page size requested from the commit-history endpoint.
pub const PER_PAGE: u32 = 100;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// One element of the commit-history response. Only the author matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommitEntry {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

/// Platform account attached to a commit. Null for commits whose email does
/// not map to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub login: Option<String>,
}

impl CommitEntry {
    pub fn by(login: &str) -> Self {
        CommitEntry {
            author: Some(CommitAuthor {
                login: Some(login.to_string()),
            }),
        }
    }

    pub fn login(&self) -> Option<&str> {
        self.author.as_ref()?.login.as_deref()
    }
}

/// Source of paginated commit history for files in one repository.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CommitHistory: Send + Sync {
    /// Fetch page `page` (1-based) of commits touching `file_path`.
    async fn commits_page(&self, file_path: &str, page: u32) -> Result<Vec<CommitEntry>>;
}

/// Walks every page of `file_path`'s history and collects the author logins.
pub async fn resolve_contributors<H>(history: &H, file_path: &str) -> Result<ContributorSet>
where
    H: CommitHistory + ?Sized,
{
    let mut contributors = ContributorSet::new();
    let mut page = 1;

    loop {
        let commits = history.commits_page(file_path, page).await?;
        if commits.is_empty() {
            break;
        }
        debug!(file_path, page, commits = commits.len(), "Fetched commit page");

        contributors.extend(
            commits
                .iter()
                .filter_map(CommitEntry::login)
                .map(str::to_string),
        );
        page += 1;
    }

    info!(
        file_path,
        pages = page - 1,
        contributors = contributors.len(),
        "Resolved contributors"
    );
    Ok(contributors)
}

/// [`CommitHistory`] backed by the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    commits_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base_url: &str, owner: &str, repo: &str, token: Option<String>) -> Self {
        let commits_url = format!(
            "{}/repos/{}/{}/commits",
            api_base_url.trim_end_matches('/'),
            owner,
            repo
        );
        Self {
            client: Client::new(),
            commits_url,
            token,
        }
    }

    /// Client for the configured repository, or `None` when owner/repo are unset.
    pub fn from_config(config: &CollectConfig) -> Option<Self> {
        let (owner, repo) = config.repository()?;
        info!(
            owner,
            repo,
            authenticated = config.token.is_some(),
            "Initialised GitHub client"
        );
        Some(Self::new(
            &config.api_base_url,
            owner,
            repo,
            config.token.clone(),
        ))
    }

    pub fn commits_url(&self) -> &str {
        &self.commits_url
    }
}

#[async_trait]
impl CommitHistory for GitHubClient {
    async fn commits_page(&self, file_path: &str, page: u32) -> Result<Vec<CommitEntry>> {
        let mut request = self
            .client
            .get(&self.commits_url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(
                USER_AGENT,
                concat!("rules-collector/", env!("CARGO_PKG_VERSION")),
            )
            .query(&[
                ("path", file_path.to_string()),
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
            ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(
                status = %status,
                url = %url,
                file_path,
                page,
                "Commit history API returned error"
            );
            return Err(CollectError::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let body = response.text().await?;
        let commits: Vec<CommitEntry> = serde_json::from_str(&body)?;
        Ok(commits)
    }
}
