//! Sample types stored in a [`Field`](crate::Field).
//!
//! A field holds either one float per pixel (luminance, gradients, masks) or
//! a 3-component float vector (linear RGB or XYZ tristimulus). The [`Sample`]
//! trait lets component-wise operations such as min/max search, normalization
//! and gamma be written once for both.
//!
//! ```rust
//! use lumina_core::Sample;
//! use glam::Vec3;
//!
//! let c = Vec3::new(0.2, 0.9, 0.4);
//! assert_eq!(c.min_component(), 0.2);
//! assert_eq!(c.max_component(), 0.9);
//! assert_eq!(c.map_components(|v| v * 2.0), Vec3::new(0.4, 1.8, 0.8));
//! ```

use glam::Vec3;

/// A pixel sample made of one or more `f32` components.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Number of float components per sample.
    const COMPONENTS: usize;

    /// Smallest component.
    fn min_component(self) -> f32;

    /// Largest component.
    fn max_component(self) -> f32;

    /// Applies `f` to every component.
    fn map_components(self, f: impl Fn(f32) -> f32) -> Self;

    /// Sample with every component set to `v`.
    fn splat(v: f32) -> Self;
}

impl Sample for f32 {
    const COMPONENTS: usize = 1;

    #[inline]
    fn min_component(self) -> f32 {
        self
    }

    #[inline]
    fn max_component(self) -> f32 {
        self
    }

    #[inline]
    fn map_components(self, f: impl Fn(f32) -> f32) -> Self {
        f(self)
    }

    #[inline]
    fn splat(v: f32) -> Self {
        v
    }
}

impl Sample for Vec3 {
    const COMPONENTS: usize = 3;

    #[inline]
    fn min_component(self) -> f32 {
        self.min_element()
    }

    #[inline]
    fn max_component(self) -> f32 {
        self.max_element()
    }

    #[inline]
    fn map_components(self, f: impl Fn(f32) -> f32) -> Self {
        Vec3::new(f(self.x), f(self.y), f(self.z))
    }

    #[inline]
    fn splat(v: f32) -> Self {
        Vec3::splat(v)
    }
}
