//! Error types for lumina-core operations.
//!
//! Field construction is the only fallible part of the data model: raw
//! sample buffers must match the declared dimensions, and fields that take
//! part in the same computation must share a size.
//!
//! # Usage
//!
//! ```rust
//! use lumina_core::{Error, Result};
//!
//! fn check(x: usize, y: usize, width: usize, height: usize) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 0, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by field construction and shape checks.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample coordinates are outside field bounds.
    #[error("sample ({x}, {y}) out of bounds for field {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: usize,
        /// Y coordinate that was out of bounds
        y: usize,
        /// Field width
        width: usize,
        /// Field height
        height: usize,
    },

    /// Two fields taking part in one computation have different sizes.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First field width
        a_width: usize,
        /// First field height
        a_height: usize,
        /// Second field width
        b_width: usize,
        /// Second field height
        b_height: usize,
    },

    /// Sample buffer does not describe a `width x height` grid.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error from two `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::out_of_bounds(10, 4, 8, 8);
        assert_eq!(err.to_string(), "sample (10, 4) out of bounds for field 8x8");

        let err = Error::dimension_mismatch((4, 3), (5, 3));
        assert_eq!(err.to_string(), "dimension mismatch: 4x3 vs 5x3");

        let err = Error::invalid_dimensions(2, 2, "expected 4 samples, got 3");
        assert!(err.to_string().contains("expected 4 samples"));
    }
}
