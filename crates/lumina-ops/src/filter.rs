//! Edge-preserving bilateral filtering.
//!
//! The bilateral filter weights every neighbor by both its spatial distance
//! and its intensity difference from the center sample, so it smooths flat
//! regions while leaving strong edges intact. In the tone-mapping pipeline it
//! splits log-luminance into a base (smoothed) and detail (residual) layer.
//!
//! ```text
//! w(p, q) = exp(-|p - q|^2 / 2 sigma_s^2) * exp(-(H(p) - H(q))^2 / 2 sigma_r^2)
//! out(p)  = sum_q w(p, q) H(q) / sum_q w(p, q)
//! ```
//!
//! Neighbors outside the field are skipped, not clamped, so borders are not
//! darkened.
//!
//! # Example
//!
//! ```rust
//! use lumina_core::ScalarField;
//! use lumina_ops::filter::bilateral_filter;
//!
//! let flat = ScalarField::filled(16, 16, 0.5);
//! let out = bilateral_filter(&flat, 5, 2.0, 0.1).unwrap();
//! assert!((out.get(0, 0) - 0.5).abs() < 1e-6);
//! ```

use crate::{OpsError, OpsResult};
use lumina_core::ScalarField;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Precomputed spatial Gaussian weights for a square window.
///
/// Weights are not normalized; the bilateral filter normalizes per pixel.
#[derive(Debug, Clone)]
pub struct SpatialKernel {
    data: Vec<f32>,
    size: usize,
}

impl SpatialKernel {
    /// Builds the `size x size` table of `exp(-(dx^2 + dy^2) / 2 sigma^2)`.
    ///
    /// # Errors
    ///
    /// Fails if `size` is even or `sigma` is negative or NaN.
    ///
    /// ```rust
    /// use lumina_ops::filter::SpatialKernel;
    ///
    /// let k = SpatialKernel::new(3, 1.0).unwrap();
    /// assert_eq!(k.weight(0, 0), 1.0);
    /// assert!(SpatialKernel::new(4, 1.0).is_err());
    /// ```
    pub fn new(size: usize, sigma: f32) -> OpsResult<Self> {
        if size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel size must be odd, got {}",
                size
            )));
        }
        validate_sigma("space_sigma", sigma)?;

        let radius = (size / 2) as i32;
        let inv = inv_two_sigma_sq(sigma);
        let mut data = Vec::with_capacity(size * size);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                data.push(gaussian((dx * dx + dy * dy) as f32, inv));
            }
        }
        Ok(Self { data, size })
    }

    /// Row-major `size x size` weights.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Window side length (odd).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Window radius.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight for the offset `(dx, dy)` from the window center.
    #[inline]
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let r = self.radius() as isize;
        self.data[((dy + r) as usize) * self.size + (dx + r) as usize]
    }
}

/// Bilateral filter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BilateralParams {
    /// Window side length, `2 * radius + 1`.
    pub size: usize,
    /// Spatial Gaussian sigma in pixels.
    pub space_sigma: f32,
    /// Range Gaussian sigma in intensity units.
    pub range_sigma: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            size: 9,
            space_sigma: 2.0,
            range_sigma: 0.4,
        }
    }
}

impl BilateralParams {
    /// Filters `field` with these settings.
    pub fn apply(&self, field: &ScalarField) -> OpsResult<ScalarField> {
        bilateral_filter(field, self.size, self.space_sigma, self.range_sigma)
    }
}

/// Applies the bilateral filter to an intensity field.
///
/// # Arguments
///
/// * `h` - Intensity field (typically log-luminance)
/// * `size` - Odd window size
/// * `space_sigma` - Spatial sigma; `0` keeps only the center tap
/// * `range_sigma` - Range sigma; `0` gives the identity, `inf` a Gaussian blur
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] for an even `size` or a negative/NaN sigma.
pub fn bilateral_filter(
    h: &ScalarField,
    size: usize,
    space_sigma: f32,
    range_sigma: f32,
) -> OpsResult<ScalarField> {
    trace!(
        width = h.width(),
        height = h.height(),
        size,
        space_sigma,
        range_sigma,
        "bilateral_filter"
    );

    let kernel = SpatialKernel::new(size, space_sigma)?;
    validate_sigma("range_sigma", range_sigma)?;

    let radius = kernel.radius() as isize;
    let inv_range = inv_two_sigma_sq(range_sigma);
    let (width, height) = (h.width() as isize, h.height() as isize);

    Ok(ScalarField::from_rows(h.width(), h.height(), |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            let center = h.get(x as usize, y as usize);
            let mut total_weight = 0.0f32;
            let mut filtered = 0.0f32;

            for dy in -radius..=radius {
                let ny = y + dy;
                if ny < 0 || ny >= height {
                    continue;
                }
                for dx in -radius..=radius {
                    let nx = x + dx;
                    if nx < 0 || nx >= width {
                        continue;
                    }
                    let value = h.get(nx as usize, ny as usize);
                    let diff = center - value;
                    let weight = kernel.weight(dx, dy) * gaussian(diff * diff, inv_range);
                    filtered += value * weight;
                    total_weight += weight;
                }
            }

            // The center sample always contributes weight 1.
            *out = filtered / total_weight;
        }
    }))
}

fn validate_sigma(name: &str, sigma: f32) -> OpsResult<()> {
    if sigma.is_nan() || sigma < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "{} must be >= 0, got {}",
            name, sigma
        )));
    }
    Ok(())
}

/// `1 / (2 sigma^2)`; infinite for a zero sigma.
#[inline]
fn inv_two_sigma_sq(sigma: f32) -> f32 {
    1.0 / (2.0 * sigma * sigma)
}

/// `exp(-d2 * inv)` with `d2 == 0` pinned to 1 so a zero sigma stays finite.
#[inline]
fn gaussian(d2: f32, inv: f32) -> f32 {
    if d2 == 0.0 { 1.0 } else { (-d2 * inv).exp() }
}
