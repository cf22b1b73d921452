//! Error types for srcmap.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::walker::WalkError;

/// Top-level error type for srcmap operations.
#[derive(Debug, thiserror::Error)]
pub enum SrcmapError {
    #[error("scan root not found: {0}")]
    ScanRootNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<WalkError> for SrcmapError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::NotFound { path } => SrcmapError::ScanRootNotFound(path),
            WalkError::NotADirectory { path } => SrcmapError::NotADirectory(path),
        }
    }
}

/// Map an error to its exit code.
pub fn exit_code(error: &SrcmapError) -> i32 {
    match error {
        SrcmapError::ScanRootNotFound(_) => 3,
        SrcmapError::NotADirectory(_) => 4,
        SrcmapError::Write { .. } => 5,
        SrcmapError::Config(_) => 6,
        SrcmapError::Io(_) => 1,
    }
}
