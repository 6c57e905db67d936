//! Error types for collaborator operations.

use thiserror::Error;

/// Result type for collaborator operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur at the collaborator boundary.
///
/// These represent external-world outcomes (upload, persistence, ledger)
/// and are surfaced to the user as status; the in-memory document is never
/// affected by them.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Transport-level failure talking to the pinning service.
    #[error("Upload failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The pinning service answered with a non-success status.
    #[error("Pinning service rejected request: {0}")]
    Rejected(String),

    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A collaborator endpoint URL could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A ledger action failed on the chain side.
    #[error("Ledger action failed: {0}")]
    Ledger(String),
}
