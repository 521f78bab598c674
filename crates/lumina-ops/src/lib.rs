//! # lumina-ops
//!
//! Computational-photography kernels on [`lumina_core`] fields.
//!
//! # Modules
//!
//! - [`range`] - Luminance, min/max, normalization, gamma
//! - [`filter`] - Edge-preserving bilateral filter
//! - [`tonemap`] - Base/detail tone mapping and luminance-ratio RGB rescaling
//! - [`gradient`] - Forward-difference gradients and backward divergence
//! - [`composite`] - Mask-driven gradient merge and seamless cloning
//! - [`poisson`] - Jacobi Poisson solver
//!
//! # Common Operations
//!
//! ## Tone mapping
//!
//! ```rust
//! use lumina_core::{ColorField, Vec3};
//! use lumina_ops::tonemap::{tone_map, ToneMapParams};
//!
//! let hdr = ColorField::filled(8, 8, Vec3::splat(4.0));
//! let sdr = tone_map(&hdr, &ToneMapParams::default()).unwrap().rgb;
//! assert_eq!(sdr.size(), (8, 8));
//! ```
//!
//! ## Seamless cloning
//!
//! ```rust
//! use lumina_core::ScalarField;
//! use lumina_ops::composite::seamless_clone;
//! use lumina_ops::poisson::PoissonSolver;
//!
//! let source = ScalarField::filled(8, 8, 1.0);
//! let target = ScalarField::new(8, 8);
//! let mask = ScalarField::from_fn(8, 8, |x, y| {
//!     if (2..6).contains(&x) && (2..6).contains(&y) { 1.0 } else { 0.0 }
//! });
//! let out = seamless_clone(&source, &target, &mask, &PoissonSolver::new(200)).unwrap();
//! assert_eq!(out.size(), (8, 8));
//! ```
//!
//! The expensive kernels (bilateral filter, min/max reduction, one Poisson
//! pass) run row-parallel on the rayon global pool. Progress and parameter
//! details are emitted through `tracing`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod filter;
pub mod gradient;
pub mod poisson;
pub mod range;
pub mod tonemap;

pub use error::{OpsError, OpsResult};
pub use filter::{bilateral_filter, BilateralParams};
pub use poisson::{solve_poisson, PoissonSolver};
pub use tonemap::{tone_map, ToneMapParams};
