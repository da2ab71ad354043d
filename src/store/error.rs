//! Store configuration errors.

use thiserror::Error;

/// Errors that can occur when loading or validating a [`super::StoreConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("Failed to parse store configuration: {0}")]
    Parse(String),

    /// The slice identifier is empty
    #[error("Slice id must not be empty")]
    EmptySliceId,

    /// A size limit was set to zero
    #[error("{field} must be greater than zero when set")]
    ZeroLimit { field: &'static str },
}
