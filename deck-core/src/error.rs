//! Error types for deck operations.

use thiserror::Error;

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur in deck operations.
///
/// Store edge cases (missing IDs, invariant-guard rejections) are silent
/// no-ops and never surface here; only serialization boundaries produce
/// errors.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Imported data carries neither `slides` nor a legacy `elements` list.
    #[error("Document has neither `slides` nor `elements`")]
    MalformedDocument,
}
