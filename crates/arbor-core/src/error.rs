//! Error type for the snapshot store boundary

use thiserror::Error;

/// Errors surfaced by snapshot persistence. Everything else in the core
/// degrades to `Option`/empty collections instead of failing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
