//! Gradient field pair.
//!
//! A [`GradientField`] stores forward differences of a `w x h` scalar field
//! in two planes of size `(w + 1) x (h + 1)`. The extra row and column hold
//! the differences that cross the far edge of the source under an implicit
//! zero border.

use crate::{Error, Result, ScalarField};

/// Horizontal and vertical gradient planes of identical size.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    /// Horizontal differences.
    pub dx: ScalarField,
    /// Vertical differences.
    pub dy: ScalarField,
}

impl GradientField {
    /// Zero gradients with planes of `width x height`.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            dx: ScalarField::new(width, height),
            dy: ScalarField::new(width, height),
        }
    }

    /// Builds a gradient field from two planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn from_planes(dx: ScalarField, dy: ScalarField) -> Result<Self> {
        dx.ensure_same_size(&dy)?;
        Ok(Self { dx, dy })
    }

    /// Plane width.
    #[inline]
    pub fn width(&self) -> usize {
        self.dx.width()
    }

    /// Plane height.
    #[inline]
    pub fn height(&self) -> usize {
        self.dx.height()
    }

    /// `(width, height)` of the planes.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        self.dx.size()
    }

    /// Size of the scalar field these gradients were taken from.
    pub fn source_size(&self) -> (usize, usize) {
        (
            self.width().saturating_sub(1),
            self.height().saturating_sub(1),
        )
    }

    /// Fails with [`Error::DimensionMismatch`] unless both gradient fields share a size.
    pub fn ensure_same_size(&self, other: &GradientField) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::dimension_mismatch(self.size(), other.size()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let g = GradientField::zeros(5, 4);
        assert_eq!(g.size(), (5, 4));
        assert_eq!(g.source_size(), (4, 3));
        assert!(g.dx.data().iter().chain(g.dy.data()).all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_planes_mismatch() {
        let result = GradientField::from_planes(ScalarField::new(3, 3), ScalarField::new(3, 4));
        assert!(result.is_err());
    }
}
