//! Error types for a synchronization run.
//!
//! Every variant is terminal for the run. Recovery means running the job
//! again later.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single translation request.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to send translation request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse OpenAI response: {0}")]
    Decode(String),

    #[error("OpenAI response contained no choices")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Usage: lang-sync [--dry-run] <lang>")]
    Usage,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("base resource {} could not be loaded: {source}", .path.display())]
    MissingBaseResource {
        path: PathBuf,
        #[source]
        source: ResourceError,
    },

    #[error("target resource {} is malformed: {source}", .path.display())]
    MalformedTargetResource {
        path: PathBuf,
        #[source]
        source: ResourceError,
    },

    #[error("translation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Low-level failure reading a resource file.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
