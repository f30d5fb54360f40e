//! Unit directions in 2D and 3D

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::config::CONFUSION;

/// A unit vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dir(DVec3);

impl Dir {
    pub const X: Dir = Dir(DVec3::X);
    pub const Y: Dir = Dir(DVec3::Y);
    pub const Z: Dir = Dir(DVec3::Z);
    pub const NEG_X: Dir = Dir(DVec3::NEG_X);
    pub const NEG_Y: Dir = Dir(DVec3::NEG_Y);
    pub const NEG_Z: Dir = Dir(DVec3::NEG_Z);

    /// Normalize `v`. Returns `None` if `v` has (near) zero length.
    pub fn new(v: DVec3) -> Option<Self> {
        let length = v.length();
        if !length.is_finite() || length <= CONFUSION {
            return None;
        }
        Some(Self(v / length))
    }

    pub fn from_xyz(x: f64, y: f64, z: f64) -> Option<Self> {
        Self::new(DVec3::new(x, y, z))
    }

    /// The underlying unit vector
    pub fn get(&self) -> DVec3 {
        self.0
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn reversed(&self) -> Self {
        Self(-self.0)
    }

    pub fn dot(&self, other: &Dir) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product, `None` when the directions are parallel
    pub fn cross(&self, other: &Dir) -> Option<Dir> {
        Dir::new(self.0.cross(other.0))
    }

    /// Angle between the two directions in `[0, PI]`
    pub fn angle(&self, other: &Dir) -> f64 {
        self.0.dot(other.0).clamp(-1.0, 1.0).acos()
    }

    /// Parallel or anti-parallel within `angular_tolerance`
    pub fn is_parallel(&self, other: &Dir, angular_tolerance: f64) -> bool {
        let angle = self.angle(other);
        angle <= angular_tolerance || std::f64::consts::PI - angle <= angular_tolerance
    }

    pub fn is_normal(&self, other: &Dir, angular_tolerance: f64) -> bool {
        (std::f64::consts::FRAC_PI_2 - self.angle(other)).abs() <= angular_tolerance
    }
}

impl From<Dir> for DVec3 {
    fn from(dir: Dir) -> Self {
        dir.0
    }
}

impl std::ops::Neg for Dir {
    type Output = Dir;

    fn neg(self) -> Dir {
        self.reversed()
    }
}

impl std::ops::Mul<f64> for Dir {
    type Output = DVec3;

    fn mul(self, rhs: f64) -> DVec3 {
        self.0 * rhs
    }
}

/// A unit vector in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dir2d(DVec2);

impl Dir2d {
    pub const X: Dir2d = Dir2d(DVec2::X);
    pub const Y: Dir2d = Dir2d(DVec2::Y);
    pub const NEG_X: Dir2d = Dir2d(DVec2::NEG_X);
    pub const NEG_Y: Dir2d = Dir2d(DVec2::NEG_Y);

    pub fn new(v: DVec2) -> Option<Self> {
        let length = v.length();
        if !length.is_finite() || length <= CONFUSION {
            return None;
        }
        Some(Self(v / length))
    }

    pub fn get(&self) -> DVec2 {
        self.0
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn reversed(&self) -> Self {
        Self(-self.0)
    }

    /// Z component of the 2D cross product
    pub fn crossed(&self, other: &Dir2d) -> f64 {
        self.0.perp_dot(other.0)
    }
}

impl From<Dir2d> for DVec2 {
    fn from(dir: Dir2d) -> Self {
        dir.0
    }
}

pub fn x() -> Dir {
    Dir::X
}

pub fn y() -> Dir {
    Dir::Y
}

pub fn z() -> Dir {
    Dir::Z
}

pub fn minus_x() -> Dir {
    Dir::NEG_X
}

pub fn minus_y() -> Dir {
    Dir::NEG_Y
}

pub fn minus_z() -> Dir {
    Dir::NEG_Z
}

pub fn x2d() -> Dir2d {
    Dir2d::X
}

pub fn y2d() -> Dir2d {
    Dir2d::Y
}

pub fn minus_x2d() -> Dir2d {
    Dir2d::NEG_X
}

pub fn minus_y2d() -> Dir2d {
    Dir2d::NEG_Y
}

/// Direction orthogonal to both `a` and `b` (`a x b`)
///
/// Returns `None` if `a` and `b` are parallel.
pub fn orthogonal(a: &Dir, b: &Dir) -> Option<Dir> {
    a.cross(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes() {
        let dir = Dir::from_xyz(3.0, 0.0, 4.0).unwrap();
        assert_relative_eq!(dir.get().length(), 1.0);
        assert_relative_eq!(dir.x(), 0.6);
        assert_relative_eq!(dir.z(), 0.8);
    }

    #[test]
    fn test_zero_vector_rejected() {
        assert!(Dir::new(DVec3::ZERO).is_none());
        assert!(Dir2d::new(DVec2::new(1e-9, 0.0)).is_none());
        assert!(Dir::new(DVec3::new(f64::NAN, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_orthogonal() {
        let dir = orthogonal(&x(), &y()).unwrap();
        assert_eq!(dir, z());
        assert!(orthogonal(&x(), &minus_x()).is_none());
    }

    #[test]
    fn test_parallel_and_normal() {
        assert!(x().is_parallel(&minus_x(), 1e-12));
        assert!(!x().is_parallel(&y(), 1e-12));
        assert!(x().is_normal(&z(), 1e-12));
    }
}
