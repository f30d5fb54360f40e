//! Axes and coordinate frames

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::{Dir, Dir2d};

/// A located direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis1 {
    pub location: DVec3,
    pub direction: Dir,
}

impl Axis1 {
    pub fn new(location: DVec3, direction: Dir) -> Self {
        Self {
            location,
            direction,
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.location, self.direction.reversed())
    }
}

impl std::ops::Add<DVec3> for Axis1 {
    type Output = Axis1;

    fn add(self, rhs: DVec3) -> Axis1 {
        translated(&self, rhs)
    }
}

/// A right-handed coordinate frame
///
/// `direction` is the main (Z) direction, `x_direction` is perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis2 {
    pub location: DVec3,
    pub direction: Dir,
    pub x_direction: Dir,
}

impl Axis2 {
    /// Frame with a default X direction perpendicular to `direction`
    pub fn new(location: DVec3, direction: Dir) -> Self {
        let v = direction.get();
        let (a, b, c) = (v.x.abs(), v.y.abs(), v.z.abs());
        let x = if b <= a && b <= c {
            if a > c {
                DVec3::new(-v.z, 0.0, v.x)
            } else {
                DVec3::new(v.z, 0.0, -v.x)
            }
        } else if a <= b && a <= c {
            if b > c {
                DVec3::new(0.0, -v.z, v.y)
            } else {
                DVec3::new(0.0, v.z, -v.y)
            }
        } else if a > b {
            DVec3::new(-v.y, v.x, 0.0)
        } else {
            DVec3::new(v.y, -v.x, 0.0)
        };
        // x is perpendicular to v with length >= 1/sqrt(2)
        let x_direction = Dir::new(x).unwrap_or(Dir::X);
        Self {
            location,
            direction,
            x_direction,
        }
    }

    /// Frame with an explicit X hint. The hint is projected into the plane
    /// normal to `direction`; `None` if it is parallel to `direction`.
    pub fn with_x_direction(location: DVec3, direction: Dir, x_hint: Dir) -> Option<Self> {
        let main = direction.get();
        let hint = x_hint.get();
        let x_direction = Dir::new(hint - main * hint.dot(main))?;
        Some(Self {
            location,
            direction,
            x_direction,
        })
    }

    pub fn y_direction(&self) -> Dir {
        Dir::new(self.direction.get().cross(self.x_direction.get())).unwrap_or(Dir::Y)
    }

    pub fn axis(&self) -> Axis1 {
        Axis1::new(self.location, self.direction)
    }

    /// Point at local coordinates `(x, y, z)`
    pub fn point_at(&self, x: f64, y: f64, z: f64) -> DVec3 {
        self.location
            + self.x_direction.get() * x
            + self.y_direction().get() * y
            + self.direction.get() * z
    }

    /// Local coordinates of a global point
    pub fn to_local(&self, pnt: DVec3) -> DVec3 {
        let d = pnt - self.location;
        DVec3::new(
            d.dot(self.x_direction.get()),
            d.dot(self.y_direction().get()),
            d.dot(self.direction.get()),
        )
    }
}

/// A located direction in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis2d {
    pub location: DVec2,
    pub direction: Dir2d,
}

impl Axis2d {
    pub fn new(location: DVec2, direction: Dir2d) -> Self {
        Self {
            location,
            direction,
        }
    }
}

/// Whether `pnt` lies on the (infinite) line of `axis` within `tolerance`
pub fn contains(axis: &Axis1, pnt: DVec3, tolerance: f64) -> bool {
    distance(axis, pnt) <= tolerance
}

/// Distance of `pnt` from the (infinite) line of `axis`
pub fn distance(axis: &Axis1, pnt: DVec3) -> f64 {
    (pnt - axis.location).cross(axis.direction.get()).length()
}

/// The axis moved by `vec`
pub fn translated(axis: &Axis1, vec: DVec3) -> Axis1 {
    Axis1::new(axis.location + vec, axis.direction)
}

/// Axes through the origin
pub mod ax1 {
    use super::*;

    pub fn ox() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::X)
    }

    pub fn oy() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::Y)
    }

    pub fn oz() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::Z)
    }

    pub fn o_minus_x() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::NEG_X)
    }

    pub fn o_minus_y() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::NEG_Y)
    }

    pub fn o_minus_z() -> Axis1 {
        Axis1::new(DVec3::ZERO, Dir::NEG_Z)
    }
}

/// Frames through the origin
pub mod ax2 {
    use super::*;

    pub fn from_ax1(axis: &Axis1) -> Axis2 {
        Axis2::new(axis.location, axis.direction)
    }

    pub fn ox() -> Axis2 {
        from_ax1(&ax1::ox())
    }

    pub fn oy() -> Axis2 {
        from_ax1(&ax1::oy())
    }

    pub fn oz() -> Axis2 {
        from_ax1(&ax1::oz())
    }

    pub fn o_minus_x() -> Axis2 {
        from_ax1(&ax1::o_minus_x())
    }

    pub fn o_minus_y() -> Axis2 {
        from_ax1(&ax1::o_minus_y())
    }

    pub fn o_minus_z() -> Axis2 {
        from_ax1(&ax1::o_minus_z())
    }
}
