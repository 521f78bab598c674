//! Discrete gradient and divergence operators.
//!
//! Both operators treat the field as surrounded by an implicit zero border:
//!
//! ```text
//! dx(x, y)  = P(x + 1, y) - P(x, y)                       forward difference
//! dy(x, y)  = P(x, y + 1) - P(x, y)
//! div(x, y) = dx(x, y) - dx(x - 1, y) + dy(x, y) - dy(x, y - 1)   backward difference
//! ```
//!
//! where `P` reads zero outside the field. Each operator grows its output by
//! one sample per axis so boundary-crossing differences are kept. Composed,
//! they give the 5-point Laplacian used by the Poisson solver, and they are
//! adjoint: `<grad X, G> = -<X, div G>`.
//!
//! # Example
//!
//! ```rust
//! use lumina_core::ScalarField;
//! use lumina_ops::gradient::{gradients, divergence};
//!
//! let img = ScalarField::from_fn(4, 3, |x, _| x as f32);
//! let g = gradients(&img);
//! assert_eq!(g.size(), (5, 4));
//! assert_eq!(g.dx.get(1, 0), 1.0);
//! assert_eq!(divergence(&g).size(), (6, 5));
//! ```

use lumina_core::{GradientField, ScalarField};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Forward-difference gradients with an implicit zero border.
///
/// Output planes are `(width + 1) x (height + 1)`.
pub fn gradients(image: &ScalarField) -> GradientField {
    trace!(width = image.width(), height = image.height(), "gradients");
    let (w, h) = (image.width() + 1, image.height() + 1);

    let dx = ScalarField::from_rows(w, h, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            *out = image.get_padded(x + 1, y) - image.get_padded(x, y);
        }
    });
    let dy = ScalarField::from_rows(w, h, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            *out = image.get_padded(x, y + 1) - image.get_padded(x, y);
        }
    });

    GradientField { dx, dy }
}

/// Backward-difference divergence with an implicit zero border.
///
/// Output is one sample larger per axis than the gradient planes.
pub fn divergence(gradients: &GradientField) -> ScalarField {
    trace!(width = gradients.width(), height = gradients.height(), "divergence");
    let (dx, dy) = (&gradients.dx, &gradients.dy);

    ScalarField::from_rows(gradients.width() + 1, gradients.height() + 1, |y, row| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            *out = dx.get_padded(x, y) - dx.get_padded(x - 1, y) + dy.get_padded(x, y)
                - dy.get_padded(x, y - 1);
        }
    })
}

/// `divergence(gradients(image))`, the 5-point Laplacian of the zero-padded field.
pub fn laplacian(image: &ScalarField) -> ScalarField {
    divergence(&gradients(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wavy(width: usize, height: usize) -> ScalarField {
        ScalarField::from_fn(width, height, |x, y| {
            ((x as f32) * 0.7).sin() + ((y as f32) * 1.3).cos() * 0.5
        })
    }

    #[test]
    fn test_gradient_sizes() {
        let g = gradients(&ScalarField::new(7, 3));
        assert_eq!(g.dx.size(), (8, 4));
        assert_eq!(g.dy.size(), (8, 4));
        assert_eq!(divergence(&g).size(), (9, 5));
    }

    #[test]
    fn test_forward_differences_with_zero_border() {
        let img = ScalarField::from_data(3, 2, vec![1.0, 2.0, 4.0, 3.0, 5.0, 9.0]).unwrap();
        let g = gradients(&img);

        assert_eq!(g.dx.get(0, 0), 1.0);
        assert_eq!(g.dx.get(1, 0), 2.0);
        // Past the right edge reads as zero
        assert_eq!(g.dx.get(2, 0), -4.0);
        assert_eq!(g.dx.get(3, 0), 0.0);

        assert_eq!(g.dy.get(0, 0), 2.0);
        assert_eq!(g.dy.get(2, 0), 5.0);
        assert_eq!(g.dy.get(1, 1), -5.0);
        assert_eq!(g.dy.get(1, 2), 0.0);
    }

    #[test]
    fn test_laplacian_of_paraboloid() {
        let img = ScalarField::from_fn(9, 8, |x, y| (x * x + y * y) as f32);
        let lap = laplacian(&img);
        for y in 1..7 {
            for x in 1..8 {
                assert_abs_diff_eq!(lap.get(x, y), 4.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_laplacian_matches_five_point_stencil() {
        let img = wavy(6, 5);
        let lap = laplacian(&img);
        for y in 1..5isize {
            for x in 1..6isize {
                let p = |dx: isize, dy: isize| img.get_padded(x + dx, y + dy);
                let stencil = p(1, 0) + p(-1, 0) + p(0, 1) + p(0, -1) - 4.0 * p(0, 0);
                assert_abs_diff_eq!(lap.get(x as usize, y as usize), stencil, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_operators_are_adjoint() {
        let img = wavy(5, 4);
        let g = GradientField {
            dx: ScalarField::from_fn(6, 5, |x, y| (x as f32 - y as f32 * 0.5).sin()),
            dy: ScalarField::from_fn(6, 5, |x, y| (x as f32 * 0.3 + y as f32).cos()),
        };

        let grad = gradients(&img);
        let lhs: f32 = grad
            .dx
            .data()
            .iter()
            .zip(g.dx.data())
            .chain(grad.dy.data().iter().zip(g.dy.data()))
            .map(|(a, b)| a * b)
            .sum();

        let div = divergence(&g);
        let mut rhs = 0.0;
        for y in 0..img.height() {
            for x in 0..img.width() {
                rhs -= img.get(x, y) * div.get(x, y);
            }
        }
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-4);
    }

    #[test]
    fn test_inputs_untouched() {
        let img = wavy(4, 4);
        let copy = img.clone();
        let _ = laplacian(&img);
        assert_eq!(img, copy);
    }
}
