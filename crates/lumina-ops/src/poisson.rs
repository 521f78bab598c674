//! Jacobi solver for the Poisson equation `laplacian(I) = div G`.
//!
//! Every pass computes a full new field from the previous one:
//!
//! ```text
//! next(x, y) = 0.25 * (cur(x+1, y) + cur(x-1, y) + cur(x, y+1) + cur(x, y-1) - div(x, y))
//! ```
//!
//! Border samples are copied unchanged, which fixes them to the initial
//! guess (Dirichlet boundary). Rows of one pass are computed in parallel;
//! the buffer swap between passes is the only synchronization point, so no
//! sample ever reads a neighbor updated in the same pass.
//!
//! # Example
//!
//! ```rust
//! use lumina_core::ScalarField;
//! use lumina_ops::poisson::PoissonSolver;
//!
//! let guess = ScalarField::filled(8, 8, 0.5);
//! let div = ScalarField::new(10, 10);
//! let solved = PoissonSolver::new(100).solve(&guess, &div).unwrap();
//! assert_eq!(solved, guess);
//! ```

use crate::{OpsError, OpsResult};
use lumina_core::ScalarField;
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Iterative Poisson solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonSolver {
    /// Number of Jacobi passes. There is no early exit.
    pub num_iters: usize,
    /// Log progress every this many passes; `0` disables progress logging.
    pub report_interval: usize,
}

impl Default for PoissonSolver {
    fn default() -> Self {
        Self {
            num_iters: 2000,
            report_interval: 500,
        }
    }
}

impl PoissonSolver {
    /// Solver running `num_iters` passes with the default report interval.
    pub fn new(num_iters: usize) -> Self {
        Self {
            num_iters,
            ..Self::default()
        }
    }

    /// Sets the progress report interval.
    pub fn with_report_interval(mut self, interval: usize) -> Self {
        self.report_interval = interval;
        self
    }

    /// Solves `laplacian(I) = divergence` starting from `initial`.
    ///
    /// `divergence` is indexed with the coordinates of `initial` and may be
    /// larger (as produced by [`divergence`](crate::gradient::divergence)),
    /// but not smaller.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`] if `divergence` does not cover `initial`.
    pub fn solve(&self, initial: &ScalarField, divergence: &ScalarField) -> OpsResult<ScalarField> {
        let (w, h) = initial.size();
        if divergence.width() < w || divergence.height() < h {
            return Err(OpsError::SizeMismatch(format!(
                "divergence {}x{} does not cover solution {}x{}",
                divergence.width(),
                divergence.height(),
                w,
                h
            )));
        }
        debug!(width = w, height = h, num_iters = self.num_iters, "solve_poisson");

        let mut current = initial.clone();
        let mut next = ScalarField::new(w, h);

        for iter in 0..self.num_iters {
            if self.report_interval > 0 && iter % self.report_interval == 0 {
                info!("[{}/{}] Solving Poisson equation...", iter, self.num_iters);
            }
            jacobi_step(&current, divergence, &mut next);
            std::mem::swap(&mut current, &mut next);
        }

        Ok(current)
    }
}

/// Solves `laplacian(I) = divergence` with `num_iters` Jacobi passes.
pub fn solve_poisson(
    initial: &ScalarField,
    divergence: &ScalarField,
    num_iters: usize,
) -> OpsResult<ScalarField> {
    PoissonSolver::new(num_iters).solve(initial, divergence)
}

/// One Jacobi pass from `current` into `next`.
fn jacobi_step(current: &ScalarField, divergence: &ScalarField, next: &mut ScalarField) {
    let (w, h) = current.size();
    if w == 0 {
        return;
    }

    next.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let src = &current.data()[y * w..(y + 1) * w];
            if y == 0 || y + 1 == h {
                row.copy_from_slice(src);
                return;
            }
            row[0] = src[0];
            row[w - 1] = src[w - 1];
            for x in 1..w.saturating_sub(1) {
                let neighbors = current.get(x + 1, y)
                    + current.get(x - 1, y)
                    + current.get(x, y + 1)
                    + current.get(x, y - 1);
                row[x] = 0.25 * (neighbors - divergence.get(x, y));
            }
        });
}
