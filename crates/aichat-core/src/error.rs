//! Error types for request construction.

use thiserror::Error;

/// Errors raised while validating or normalizing caller input.
///
/// Both variants are produced before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A polymorphic argument had the wrong shape.
    #[error("{0}")]
    Type(String),
}

/// Result type alias using the core Error.
pub type Result<T> = std::result::Result<T, Error>;
