//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Fields taking part in one operation have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Error raised by a core field operation.
    #[error(transparent)]
    Core(#[from] lumina_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
