use std::path::PathBuf;
use thiserror::Error;

/// Failures reading, writing or decoding the persisted vault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write vault file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported vault schema version {0}")]
    UnsupportedVersion(u64),

    #[error("Malformed vault data: {0}")]
    Malformed(String),
}

/// Failures while building a rich-text document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),
}

/// Failures of the outbound metadata call. These never reach the caller of
/// `fetch_metadata`; they are logged and replaced by the fallback pair.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("No API key configured for metadata fetch")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned status {0}")]
    Status(u16),

    #[error("Malformed metadata response: {0}")]
    Malformed(String),
}

/// Unified error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub type Result<T, E = VaultError> = std::result::Result<T, E>;
