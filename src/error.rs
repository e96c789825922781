use std::path::PathBuf;
use thiserror::Error;

/// Every failure the collection pipeline can surface.
///
/// A missing rule file is not an error: the loader logs it and skips the
/// directory. Everything here aborts the run before the output is written.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("commit history request to {url} failed with HTTP {status}: {body}")]
    Api { status: u16, url: String, body: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;
