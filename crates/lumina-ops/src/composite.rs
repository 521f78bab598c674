//! Gradient-domain compositing.
//!
//! Pastes a masked region of a source field into a target field by mixing
//! their gradients and reconstructing the result with the Poisson solver:
//!
//! ```text
//! source, target -> gradients -> mask merge -> divergence -> Poisson (seeded by target)
//! ```
//!
//! The mask is thresholded at `0.5`: above selects the source gradient,
//! otherwise the target gradient. Gradients that cross the mask boundary are
//! zeroed, independently for `dx` (left/right neighbors) and `dy`
//! (up/down neighbors).
//!
//! # Example
//!
//! ```rust
//! use lumina_core::ScalarField;
//! use lumina_ops::composite::copy_source_gradients;
//! use lumina_ops::gradient::gradients;
//!
//! let src = gradients(&ScalarField::from_fn(4, 4, |x, _| x as f32));
//! let dst = gradients(&ScalarField::new(4, 4));
//! let mask = ScalarField::filled(4, 4, 1.0);
//! let merged = copy_source_gradients(&src, &dst, &mask).unwrap();
//! assert_eq!(merged, src);
//! ```

use crate::gradient::{divergence, gradients};
use crate::poisson::PoissonSolver;
use crate::{OpsError, OpsResult};
use lumina_core::{GradientField, ScalarField};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Mask values above this select the source.
pub const MASK_THRESHOLD: f32 = 0.5;

/// Merges source and target gradients under a binary mask.
///
/// `mask` has the size of the scalar fields the gradients came from, i.e.
/// one less per axis than the gradient planes. The padding row and column
/// take the classification of their nearest mask sample.
///
/// # Errors
///
/// [`OpsError::Core`] if the gradient fields differ in size,
/// [`OpsError::SizeMismatch`] if the mask does not match them.
pub fn copy_source_gradients(
    source: &GradientField,
    target: &GradientField,
    mask: &ScalarField,
) -> OpsResult<GradientField> {
    source.ensure_same_size(target)?;
    if mask.size() != target.source_size() {
        return Err(OpsError::SizeMismatch(format!(
            "mask {}x{} does not match gradients {}x{}",
            mask.width(),
            mask.height(),
            target.width(),
            target.height()
        )));
    }
    trace!(width = target.width(), height = target.height(), "copy_source_gradients");

    let (gw, gh) = target.size();
    let classes = classify(mask, gw, gh);
    let is_source = |x: usize, y: usize| classes[y * gw + x];

    let dx = ScalarField::from_rows(gw, gh, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let c = is_source(x, y);
            let crosses = (x > 0 && is_source(x - 1, y) != c)
                || (x + 1 < gw && is_source(x + 1, y) != c);
            *out = if crosses {
                0.0
            } else if c {
                source.dx.get(x, y)
            } else {
                target.dx.get(x, y)
            };
        }
    });

    let dy = ScalarField::from_rows(gw, gh, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let c = is_source(x, y);
            let crosses = (y > 0 && is_source(x, y - 1) != c)
                || (y + 1 < gh && is_source(x, y + 1) != c);
            *out = if crosses {
                0.0
            } else if c {
                source.dy.get(x, y)
            } else {
                target.dy.get(x, y)
            };
        }
    });

    Ok(GradientField { dx, dy })
}

/// Seamlessly clones the masked part of `source` into `target` (one channel).
///
/// # Errors
///
/// Fails if `source`, `target` and `mask` differ in size.
pub fn seamless_clone(
    source: &ScalarField,
    target: &ScalarField,
    mask: &ScalarField,
    solver: &PoissonSolver,
) -> OpsResult<ScalarField> {
    source.ensure_same_size(target)?;
    debug!(
        width = target.width(),
        height = target.height(),
        num_iters = solver.num_iters,
        "seamless_clone"
    );

    let merged = copy_source_gradients(&gradients(source), &gradients(target), mask)?;
    let div = divergence(&merged);
    solver.solve(target, &div)
}

/// Source/target classification over the gradient grid, clamped to the mask.
fn classify(mask: &ScalarField, width: usize, height: usize) -> Vec<bool> {
    let mut classes = vec![false; width * height];
    if mask.is_empty() {
        return classes;
    }
    let (mw, mh) = mask.size();
    for y in 0..height {
        for x in 0..width {
            classes[y * width + x] = mask.get(x.min(mw - 1), y.min(mh - 1)) > MASK_THRESHOLD;
        }
    }
    classes
}
