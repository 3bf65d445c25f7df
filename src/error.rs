use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ConfigError, Destination};

/// Main error type for SplitPull
#[derive(Error, Debug)]
pub enum SplitPullError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Split failed: {0}")]
    Split(#[from] SplitError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Errors raised while splitting a file
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {destination} ({path}): {source}")]
    DestinationWrite {
        destination: Destination,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// Destination the failure concerns, if it was a write failure
    pub fn destination(&self) -> Option<Destination> {
        match self {
            SplitError::SourceRead { .. } => None,
            SplitError::DestinationWrite { destination, .. } => Some(*destination),
        }
    }
}

/// Errors related to the stored repository list
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Repository not in list: {0}")]
    NotConfigured(PathBuf),

    #[error("Failed to resolve path {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SplitPullError>;
