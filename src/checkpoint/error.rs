//! Checkpoint error types.

use crate::store::ConfigError;
use thiserror::Error;

/// Errors raised while capturing, encoding or restoring a session checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The checkpoint could not be encoded
    #[error("Failed to encode session checkpoint: {0}")]
    SerializationFailed(String),

    /// The bytes or document are not a session checkpoint
    #[error("Failed to decode session checkpoint: {0}")]
    DeserializationFailed(String),

    /// Written by a newer or older checkpoint format
    #[error("Session checkpoint format {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint does not describe a consistent session slice
    #[error("Session checkpoint for slice '{slice_id}' is inconsistent: {reason}")]
    ValidationFailed { slice_id: String, reason: String },

    /// The store configuration given for a restore is invalid
    #[error("Cannot restore session store: {0}")]
    InvalidConfig(#[from] ConfigError),
}
