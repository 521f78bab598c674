//! Luminance extraction and range transforms.
//!
//! - [`rgb_to_luminance`] - BT.601 luma projection
//! - [`log_field`] - natural log with a floor guard
//! - [`min_max`] - global component range (parallel reduction)
//! - [`normalize`] - fit a field into `[0, 1]`
//! - [`apply_gamma`] - per-component power curve
//!
//! # Example
//!
//! ```rust
//! use lumina_core::{ColorField, Vec3};
//! use lumina_ops::range::{rgb_to_luminance, min_max, normalize};
//!
//! let rgb = ColorField::from_fn(4, 1, |x, _| Vec3::splat(x as f32));
//! let lum = rgb_to_luminance(&rgb);
//! let norm = normalize(&lum);
//! let mm = min_max(&norm);
//! assert_eq!((mm.min, mm.max), (0.0, 1.0));
//! ```

use glam::Vec3;
use lumina_core::{ColorField, Field, Sample, ScalarField};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// BT.601 luma weights in R, G, B order.
pub const BT601_LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

/// Floor applied before taking a logarithm.
pub const LOG_EPSILON: f32 = 1e-7;

/// Inclusive component range of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    /// Smallest component value.
    pub min: f32,
    /// Largest component value.
    pub max: f32,
}

impl MinMax {
    /// Identity of [`MinMax::merge`]; the range of an empty field.
    pub const EMPTY: MinMax = MinMax {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Range covering both inputs.
    ///
    /// Associative and commutative, so per-thread partial ranges combine to
    /// the same result regardless of scheduling.
    #[inline]
    pub fn merge(self, other: MinMax) -> MinMax {
        MinMax {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Range extended by one sample.
    #[inline]
    pub fn include<T: Sample>(self, sample: T) -> MinMax {
        self.merge(MinMax {
            min: sample.min_component(),
            max: sample.max_component(),
        })
    }

    /// `max - min`.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.max - self.min
    }

    /// True if no sample contributed.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Luminance of a linear RGB field using [`BT601_LUMA`].
pub fn rgb_to_luminance(rgb: &ColorField) -> ScalarField {
    trace!(width = rgb.width(), height = rgb.height(), "rgb_to_luminance");
    rgb.map(|c| c.dot(BT601_LUMA))
}

/// Natural logarithm of every sample, floored at [`LOG_EPSILON`].
pub fn log_field(field: &ScalarField) -> ScalarField {
    field.map(|v| v.max(LOG_EPSILON).ln())
}

/// Exponential of every sample.
pub fn exp_field(field: &ScalarField) -> ScalarField {
    field.map(f32::exp)
}

/// Minimum and maximum over every component of every sample.
///
/// Rows are reduced in parallel. An empty field yields [`MinMax::EMPTY`].
pub fn min_max<T: Sample>(field: &Field<T>) -> MinMax {
    field
        .data()
        .par_iter()
        .fold(|| MinMax::EMPTY, |acc, &s| acc.include(s))
        .reduce(|| MinMax::EMPTY, MinMax::merge)
}

/// Fits all components into `[0, 1]`: `(v - min) / (max - min)`.
///
/// The global minimum maps to exactly `0.0` and the maximum to exactly `1.0`.
/// A flat field (zero extent) produces an all-zero field.
pub fn normalize<T: Sample>(field: &Field<T>) -> Field<T> {
    let mm = min_max(field);
    let extent = mm.extent();
    debug!(min = mm.min, max = mm.max, "normalize");
    if !(extent > 0.0) {
        return Field::new(field.width(), field.height());
    }
    let min = mm.min;
    field.map(|s| s.map_components(|v| (v - min) / extent))
}

/// [`normalize`] for color fields.
pub fn normalize_rgb(rgb: &ColorField) -> ColorField {
    normalize(rgb)
}

/// [`normalize`] for scalar fields.
pub fn normalize_scalar(field: &ScalarField) -> ScalarField {
    normalize(field)
}

/// Raises every component to `gamma`.
///
/// Operates on the raw values; negative components are clamped to zero first
/// so fractional exponents stay finite.
pub fn apply_gamma<T: Sample>(field: &Field<T>, gamma: f32) -> Field<T> {
    trace!(gamma, "apply_gamma");
    field.map(|s| s.map_components(|v| v.max(0.0).powf(gamma)))
}
