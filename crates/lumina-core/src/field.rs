//! Row-major sample grids.
//!
//! [`Field`] is the single container used by every kernel: a `width x height`
//! grid of [`Sample`]s stored top-to-bottom, left-to-right.
//!
//! # Memory Layout
//!
//! ```text
//! offset(x, y) = y * width + x
//!
//! [s(0,0) s(1,0) s(2,0) ...]  <- row 0
//! [s(0,1) s(1,1) s(2,1) ...]  <- row 1
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lumina_core::{ScalarField, ColorField};
//! use glam::Vec3;
//!
//! let lum = ScalarField::from_data(2, 2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
//! assert_eq!(lum.get(1, 1), 0.4);
//! assert_eq!(lum.offset(1, 1), 3);
//!
//! let rgb = ColorField::filled(4, 4, Vec3::splat(0.5));
//! assert_eq!(rgb.get(3, 3), Vec3::splat(0.5));
//! ```
//!
//! Kernels never mutate their inputs. Every kernel output is built fresh,
//! usually through [`Field::from_rows`], which fills independent rows on the
//! rayon thread pool.

use crate::{Error, Result, Sample, Xyz};
use glam::Vec3;
use rayon::prelude::*;

/// Owned `width x height` grid of samples in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T: Sample> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

/// Single-channel float field (luminance, masks, gradient components).
pub type ScalarField = Field<f32>;

/// Three-channel float field (linear RGB or XYZ tristimulus).
pub type ColorField = Field<Vec3>;

impl<T: Sample> Field<T> {
    /// Creates a field filled with zeros.
    ///
    /// ```rust
    /// use lumina_core::ScalarField;
    ///
    /// let f = ScalarField::new(3, 2);
    /// assert_eq!(f.len(), 6);
    /// assert!(f.data().iter().all(|&v| v == 0.0));
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Creates a field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Creates a field from raw row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::invalid_dimensions(width, height, "sample count overflows usize")
        })?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a field by evaluating `f(x, y)` at every position.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Creates a field by filling each row independently.
    ///
    /// `f(y, row)` receives the row index and a zero-initialized row slice of
    /// length `width`. Rows are processed in parallel, so `f` must only read
    /// shared state.
    ///
    /// ```rust
    /// use lumina_core::ScalarField;
    ///
    /// let ramp = ScalarField::from_rows(4, 3, |y, row| {
    ///     for (x, v) in row.iter_mut().enumerate() {
    ///         *v = (x + y) as f32;
    ///     }
    /// });
    /// assert_eq!(ramp.get(3, 2), 5.0);
    /// ```
    pub fn from_rows<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let mut data = vec![T::default(); width * height];
        if width > 0 {
            data.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Field width in samples.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in samples.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the field holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear offset of `(x, y)` in the sample buffer.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the field.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "sample ({}, {}) out of bounds for field {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        self.data[self.offset(x, y)]
    }

    /// Bounds-checked sample access.
    pub fn try_get(&self, x: usize, y: usize) -> Result<T> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.data[self.offset(x, y)])
    }

    /// Sample at signed coordinates, `None` outside the field.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> Option<T> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.offset(x, y)])
    }

    /// Sample at signed coordinates with an implicit zero border.
    #[inline]
    pub fn get_padded(&self, x: isize, y: isize) -> T {
        self.get_signed(x, y).unwrap_or_default()
    }

    /// Writes the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the field.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let i = self.offset(x, y);
        self.data[i] = value;
    }

    /// Row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the field and returns its sample buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Iterates over rows as slices of length `width`.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// True if both fields have identical dimensions.
    #[inline]
    pub fn same_size<U: Sample>(&self, other: &Field<U>) -> bool {
        self.size() == other.size()
    }

    /// Fails with [`Error::DimensionMismatch`] unless both fields share a size.
    pub fn ensure_same_size<U: Sample>(&self, other: &Field<U>) -> Result<()> {
        if !self.same_size(other) {
            return Err(Error::dimension_mismatch(self.size(), other.size()));
        }
        Ok(())
    }

    /// New field with `f` applied to every sample.
    pub fn map<U, F>(&self, f: F) -> Field<U>
    where
        U: Sample,
        F: Fn(T) -> U + Sync + Send,
    {
        Field {
            data: self.data.par_iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// New field combining two equally sized fields sample by sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn zip_map<U, V, F>(&self, other: &Field<U>, f: F) -> Result<Field<V>>
    where
        U: Sample,
        V: Sample,
        F: Fn(T, U) -> V + Sync + Send,
    {
        self.ensure_same_size(other)?;
        Ok(Field {
            data: self
                .data
                .par_iter()
                .zip(other.data.par_iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
        })
    }
}

impl ColorField {
    /// Splits a color field into three scalar planes.
    pub fn split_channels(&self) -> Xyz<ScalarField> {
        Xyz {
            x: self.map(|c| c.x),
            y: self.map(|c| c.y),
            z: self.map(|c| c.z),
        }
    }

    /// Reassembles a color field from three scalar planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn from_channels(planes: &Xyz<ScalarField>) -> Result<Self> {
        planes.x.ensure_same_size(&planes.y)?;
        planes.x.ensure_same_size(&planes.z)?;
        let data = planes
            .x
            .data()
            .iter()
            .zip(planes.y.data())
            .zip(planes.z.data())
            .map(|((&x, &y), &z)| Vec3::new(x, y, z))
            .collect();
        Self::from_data(planes.x.width(), planes.x.height(), data)
    }
}
