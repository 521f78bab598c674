//! Three-plane containers for per-channel processing.
//!
//! Gradient-domain compositing runs the single-channel kernels once per
//! X/Y/Z (or R/G/B) plane with no coupling between planes. [`Xyz`] holds the
//! three independent results and lets a kernel be fanned out with
//! [`Xyz::map`] or [`Xyz::try_map`]:
//!
//! ```rust
//! use lumina_core::{Channel, ColorField, Xyz};
//! use glam::Vec3;
//!
//! let rgb = ColorField::filled(2, 2, Vec3::new(0.1, 0.2, 0.3));
//! let planes: Xyz<_> = rgb.split_channels();
//! let doubled = planes.map(|p| p.map(|v| v * 2.0));
//! assert_eq!(doubled.get(Channel::Z).get(0, 0), 0.6);
//! ```

/// Channel selector for [`Xyz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// First plane (X or R).
    X,
    /// Second plane (Y or G).
    Y,
    /// Third plane (Z or B).
    Z,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::X, Channel::Y, Channel::Z];

    /// Lowercase channel name.
    pub fn name(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Z => "z",
        }
    }
}

/// Three independent values addressed by [`Channel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Xyz<T> {
    /// X (or R) plane.
    pub x: T,
    /// Y (or G) plane.
    pub y: T,
    /// Z (or B) plane.
    pub z: T,
}

impl<T> Xyz<T> {
    /// Creates a triple from its planes.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Plane for `channel`.
    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Z => &self.z,
        }
    }

    /// Applies `f` to each plane independently.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Xyz<U> {
        Xyz {
            x: f(&self.x),
            y: f(&self.y),
            z: f(&self.z),
        }
    }

    /// Applies a fallible `f` to each plane, stopping at the first error.
    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<Xyz<U>, E> {
        Ok(Xyz {
            x: f(&self.x)?,
            y: f(&self.y)?,
            z: f(&self.z)?,
        })
    }

    /// Pairs planes of two triples channel by channel.
    pub fn zip<'a, U>(&'a self, other: &'a Xyz<U>) -> Xyz<(&'a T, &'a U)> {
        Xyz {
            x: (&self.x, &other.x),
            y: (&self.y, &other.y),
            z: (&self.z, &other.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_lookup() {
        let t = Xyz::new(1, 2, 3);
        let values: Vec<i32> = Channel::ALL.iter().map(|&c| *t.get(c)).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(Channel::Y.name(), "y");
    }

    #[test]
    fn test_try_map_short_circuits() {
        let t = Xyz::new(1i32, -1, 3);
        let mut calls = 0;
        let result: Result<Xyz<u32>, String> = t.try_map(|&v| {
            calls += 1;
            u32::try_from(v).map_err(|e| e.to_string())
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_zip_pairs_channels() {
        let a = Xyz::new(1, 2, 3);
        let b = Xyz::new(10, 20, 30);
        let sums = a.zip(&b).map(|(p, q)| *p + *q);
        assert_eq!(sums, Xyz::new(11, 22, 33));
    }
}
