//! # lumina-core
//!
//! Core types for gradient-domain image processing.
//!
//! This crate provides the data model shared by every kernel in the
//! workspace:
//!
//! - [`Field`], [`ScalarField`], [`ColorField`] - row-major sample grids
//! - [`GradientField`] - forward-difference `(dx, dy)` planes, one sample
//!   larger per axis than their source
//! - [`Xyz`], [`Channel`] - three independent planes processed channel-wise
//! - [`Sample`] - scalar / 3-vector abstraction for component-wise operations
//! - [`Error`], [`Result`] - construction and shape errors
//!
//! ## Crate Structure
//!
//! ```text
//! lumina-core (this crate)
//!    ^
//!    |
//!    +-- lumina-ops (bilateral filter, tone mapping, Poisson compositing)
//!    +-- lumina-bench
//! ```
//!
//! Fields are value types: kernels take `&Field` and return a freshly built
//! field, so no buffer is ever shared between a reader and a writer.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channels;
pub mod error;
pub mod field;
pub mod gradient;
pub mod sample;

pub use channels::{Channel, Xyz};
pub use error::{Error, Result};
pub use field::{ColorField, Field, ScalarField};
pub use gradient::GradientField;
pub use sample::Sample;

pub use glam::Vec3;
