//! Human readable printing of geometric types

use std::fmt;

use glam::{DVec2, DVec3};

use super::{Axis1, Axis2, Dir, Dir2d, Plane};

/// `[x, y, z]`
pub struct Xyz(pub DVec3);

/// `[x, y]`
pub struct Xy(pub DVec2);

impl fmt::Display for Xyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for Xy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0.x, self.0.y)
    }
}

/// Point in the `gp_Pnt [x, y, z]` style
pub fn pnt(p: DVec3) -> String {
    format!("gp_Pnt {}", Xyz(p))
}

pub fn pnt2d(p: DVec2) -> String {
    format!("gp_Pnt2d {}", Xy(p))
}

pub fn vec(v: DVec3) -> String {
    format!("gp_Vec {}", Xyz(v))
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gp_Dir {}", Xyz(self.get()))
    }
}

impl fmt::Display for Dir2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gp_Dir2d {}", Xy(self.get()))
    }
}

impl fmt::Display for Axis1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gp_Ax1 {} {}", Xyz(self.location), self.direction)
    }
}

impl fmt::Display for Axis2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gp_Ax2 {} {} x: {}",
            Xyz(self.location),
            self.direction,
            self.x_direction
        )
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gp_Pln {}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ax1;

    #[test]
    fn test_formats() {
        assert_eq!(Dir::X.to_string(), "gp_Dir [1, 0, 0]");
        assert_eq!(Dir2d::Y.to_string(), "gp_Dir2d [0, 1]");
        assert_eq!(pnt(DVec3::new(1.5, 2.0, -3.0)), "gp_Pnt [1.5, 2, -3]");
        assert_eq!(vec(DVec3::ZERO), "gp_Vec [0, 0, 0]");
        assert_eq!(ax1::oz().to_string(), "gp_Ax1 [0, 0, 0] gp_Dir [0, 0, 1]");
    }
}
