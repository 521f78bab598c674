//! Bilateral (Durand) tone mapping.
//!
//! Compresses high-dynamic-range luminance while keeping local detail:
//!
//! ```text
//! RGB -> luminance -> ln -> bilateral filter (base)
//!                        -> detail = ln - base
//! out_lum = gain * exp(base_scale * base + detail)
//! RGB'    = clamp((RGB / lum)^s * out_lum, 0, 1)
//! ```
//!
//! # Example
//!
//! ```rust
//! use lumina_core::{ColorField, Vec3};
//! use lumina_ops::tonemap::{tone_map, ToneMapParams};
//!
//! let hdr = ColorField::from_fn(16, 16, |x, _| Vec3::splat(0.01 * 1.5f32.powi(x as i32)));
//! let result = tone_map(&hdr, &ToneMapParams::default()).unwrap();
//! assert!(result.rgb.data().iter().all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
//! ```

use crate::filter::BilateralParams;
use crate::range::{log_field, min_max, rgb_to_luminance};
use crate::{OpsError, OpsResult};
use glam::Vec3;
use lumina_core::{ColorField, ScalarField};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Divisor floor used when rescaling RGB by a luminance ratio.
pub const RESCALE_EPSILON: f32 = 1e-7;

/// Combines base and detail layers and returns linear luminance.
///
/// `output_gain * exp(base_scale * base + detail)`. The base is scaled before
/// the detail is added, and the gain is applied after exponentiation.
///
/// # Errors
///
/// [`OpsError::Core`] if the layers differ in size.
pub fn apply_durand_operator(
    base_layer: &ScalarField,
    detail_layer: &ScalarField,
    base_scale: f32,
    output_gain: f32,
) -> OpsResult<ScalarField> {
    trace!(base_scale, output_gain, "apply_durand_operator");
    Ok(base_layer.zip_map(detail_layer, |b, d| output_gain * (base_scale * b + d).exp())?)
}

/// `log - base`: the high-frequency residual of a log-luminance field.
pub fn detail_layer(
    log_luminance: &ScalarField,
    base_layer: &ScalarField,
) -> OpsResult<ScalarField> {
    Ok(log_luminance.zip_map(base_layer, |l, b| l - b)?)
}

/// Rescales RGB so its luminance follows `new_luminance`, clamped to `[0, 1]`.
///
/// Per channel: `clamp((c / max(lum, eps))^saturation * new_lum, 0, 1)`.
/// Negative ratios are clamped to zero before the power.
///
/// # Errors
///
/// [`OpsError::Core`] if the fields differ in size.
pub fn rescale_rgb_by_luminance(
    original_rgb: &ColorField,
    original_luminance: &ScalarField,
    new_luminance: &ScalarField,
    saturation: f32,
) -> OpsResult<ColorField> {
    original_rgb.ensure_same_size(original_luminance)?;
    original_rgb.ensure_same_size(new_luminance)?;
    trace!(saturation, "rescale_rgb_by_luminance");

    let ratio = original_rgb.zip_map(original_luminance, |c, l| c / l.max(RESCALE_EPSILON))?;
    Ok(ratio.zip_map(new_luminance, |r, l| {
        let scaled = r.max(Vec3::ZERO).powf(saturation) * l;
        scaled.clamp(Vec3::ZERO, Vec3::ONE)
    })?)
}

/// Base scale that maps the base layer's range onto `target_contrast`.
///
/// `ln(target_contrast) / (max(base) - min(base))`; `1.0` for a flat base.
pub fn base_scale_for_contrast(base_layer: &ScalarField, target_contrast: f32) -> OpsResult<f32> {
    if !(target_contrast > 0.0) {
        return Err(OpsError::InvalidParameter(format!(
            "target contrast must be > 0, got {}",
            target_contrast
        )));
    }
    let extent = min_max(base_layer).extent();
    if !(extent > 0.0) {
        return Ok(1.0);
    }
    Ok(target_contrast.ln() / extent)
}

/// Tone mapping settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToneMapParams {
    /// Bilateral filter used to extract the base layer.
    pub bilateral: BilateralParams,
    /// Multiplier applied to the log base layer.
    pub base_scale: f32,
    /// Linear multiplier applied to the output luminance.
    pub output_gain: f32,
    /// Saturation exponent used when rescaling RGB.
    pub saturation: f32,
}

impl Default for ToneMapParams {
    fn default() -> Self {
        Self {
            bilateral: BilateralParams::default(),
            base_scale: 0.5,
            output_gain: 1.0,
            saturation: 0.5,
        }
    }
}

/// Output of [`tone_map`] with its intermediate layers.
#[derive(Debug, Clone)]
pub struct ToneMapResult {
    /// Display-range RGB in `[0, 1]`.
    pub rgb: ColorField,
    /// Linear luminance of the input.
    pub luminance: ScalarField,
    /// Bilateral-filtered log luminance.
    pub base: ScalarField,
    /// `ln(luminance) - base`.
    pub detail: ScalarField,
    /// Compressed linear luminance.
    pub tone_mapped_luminance: ScalarField,
}

/// Runs the full tone-mapping pipeline on a linear HDR RGB field.
///
/// # Errors
///
/// Propagates bilateral filter parameter errors.
pub fn tone_map(rgb: &ColorField, params: &ToneMapParams) -> OpsResult<ToneMapResult> {
    debug!(
        width = rgb.width(),
        height = rgb.height(),
        base_scale = params.base_scale,
        output_gain = params.output_gain,
        "tone_map"
    );

    let luminance = rgb_to_luminance(rgb);
    let log_lum = log_field(&luminance);
    let base = params.bilateral.apply(&log_lum)?;
    let detail = detail_layer(&log_lum, &base)?;
    let tone_mapped_luminance =
        apply_durand_operator(&base, &detail, params.base_scale, params.output_gain)?;
    let rgb = rescale_rgb_by_luminance(rgb, &luminance, &tone_mapped_luminance, params.saturation)?;

    Ok(ToneMapResult {
        rgb,
        luminance,
        base,
        detail,
        tone_mapped_luminance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_durand_operation_order() {
        let base = ScalarField::filled(2, 2, 2.0);
        let detail = ScalarField::filled(2, 2, 0.5);
        let out = apply_durand_operator(&base, &detail, 0.25, 3.0).unwrap();
        let expected = 3.0 * (0.25f32 * 2.0 + 0.5).exp();
        for &v in out.data() {
            assert_abs_diff_eq!(v, expected, epsilon = 1e-5);
        }
        // Gain in log space or scaling after exp would give something else.
        assert!((expected - (0.25f32 * (2.0f32 + 0.5).exp() * 3.0)).abs() > 0.1);
        assert!((expected - (3.0f32 + 0.25 * 2.0 + 0.5).exp()).abs() > 0.1);
    }

    #[test]
    fn test_identity_decomposition() {
        // base_scale 1 and gain 1 reconstruct exp(log) exactly.
        let lum = ScalarField::from_fn(5, 5, |x, y| 0.1 + (x + 2 * y) as f32 * 0.3);
        let log_lum = log_field(&lum);
        let base = BilateralParams::default().apply(&log_lum).unwrap();
        let detail = detail_layer(&log_lum, &base).unwrap();
        let out = apply_durand_operator(&base, &detail, 1.0, 1.0).unwrap();
        for (a, b) in out.data().iter().zip(lum.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_rescale_formula() {
        let rgb = ColorField::from_data(1, 1, vec![Vec3::new(0.64, 0.16, 0.0)]).unwrap();
        let lum = ScalarField::filled(1, 1, 0.16);
        let new_lum = ScalarField::filled(1, 1, 0.2);
        let out = rescale_rgb_by_luminance(&rgb, &lum, &new_lum, 0.5).unwrap();
        let px = out.get(0, 0);
        assert_abs_diff_eq!(px.x, 0.4, epsilon = 1e-5);
        assert_abs_diff_eq!(px.y, 0.2, epsilon = 1e-5);
        assert_eq!(px.z, 0.0);
    }

    #[test]
    fn test_rescale_clamps_and_guards() {
        let pixels = vec![Vec3::splat(1.0), Vec3::ZERO, Vec3::new(-1.0, 0.5, 2.0)];
        let rgb = ColorField::from_data(3, 1, pixels).unwrap();
        let lum = ScalarField::from_data(3, 1, vec![0.01, 0.0, 0.5]).unwrap();
        let new_lum = ScalarField::filled(3, 1, 0.9);
        let out = rescale_rgb_by_luminance(&rgb, &lum, &new_lum, 0.5).unwrap();

        assert_eq!(out.get(0, 0), Vec3::ONE);
        assert_eq!(out.get(1, 0), Vec3::ZERO);
        let px = out.get(2, 0);
        assert_eq!(px.x, 0.0);
        assert_abs_diff_eq!(px.y, 0.9, epsilon = 1e-5);
        assert_eq!(px.z, 1.0);
        for c in out.data() {
            assert!(c.is_finite());
        }
    }

    #[test]
    fn test_rescale_size_mismatch() {
        let rgb = ColorField::new(2, 2);
        let lum = ScalarField::new(2, 2);
        let bad = ScalarField::new(2, 3);
        assert!(matches!(
            rescale_rgb_by_luminance(&rgb, &lum, &bad, 0.5),
            Err(OpsError::Core(_))
        ));
    }

    #[test]
    fn test_base_scale_for_contrast() {
        let base = ScalarField::from_data(2, 1, vec![-2.0, 3.0]).unwrap();
        let scale = base_scale_for_contrast(&base, 5.0).unwrap();
        assert_abs_diff_eq!(scale, 5.0f32.ln() / 5.0, epsilon = 1e-6);
        let flat = ScalarField::filled(2, 2, 1.0);
        assert_eq!(base_scale_for_contrast(&flat, 5.0).unwrap(), 1.0);
        assert!(base_scale_for_contrast(&base, 0.0).is_err());
    }

    #[test]
    fn test_tone_map_flat_gray() {
        let rgb = ColorField::filled(2, 2, Vec3::splat(0.5));
        let result = tone_map(&rgb, &ToneMapParams::default()).unwrap();
        for &l in result.luminance.data() {
            assert_abs_diff_eq!(l, 0.5, epsilon = 1e-6);
        }
        for &d in result.detail.data() {
            assert_abs_diff_eq!(d, 0.0, epsilon = 1e-5);
        }
        // exp(0.5 * ln 0.5) = sqrt(0.5); gray stays gray
        let expected = 0.5f32.sqrt();
        for c in result.rgb.data() {
            assert_abs_diff_eq!(c.x, expected, epsilon = 1e-4);
            assert_abs_diff_eq!(c.y, c.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_tone_map_compresses_range() {
        let hdr = ColorField::from_fn(24, 8, |x, _| {
            Vec3::new(1.0, 0.8, 0.6) * 2.0f32.powi(x as i32 - 12)
        });
        let result = tone_map(&hdr, &ToneMapParams::default()).unwrap();
        let in_range = min_max(&result.luminance);
        let out_range = min_max(&result.tone_mapped_luminance);
        assert!(out_range.max / out_range.min < in_range.max / in_range.min);
        let in_unit = |c: &Vec3| c.min_element() >= 0.0 && c.max_element() <= 1.0;
        assert!(result.rgb.data().iter().all(in_unit));
    }

    #[test]
    fn test_tone_map_rejects_even_kernel() {
        let params = ToneMapParams {
            bilateral: BilateralParams {
                size: 4,
                ..BilateralParams::default()
            },
            ..ToneMapParams::default()
        };
        assert!(tone_map(&ColorField::new(4, 4), &params).is_err());
    }
}
