//! Geometric primitives
//!
//! Points and vectors are plain `glam::DVec3` / `glam::DVec2`. Directions,
//! axes and planes are thin typed wrappers on top.

pub mod axis;
pub mod direction;
pub mod display;
mod equality;
pub mod line;
pub mod plane;
pub mod point;

pub use axis::{Axis1, Axis2, Axis2d, ax1, ax2};
pub use direction::{Dir, Dir2d};
pub use equality::{IsEqual, vectors_equal, vectors_equal_within};
pub use glam::{DVec2, DVec3};
pub use plane::Plane;

/// A 3D point
pub type Pnt = DVec3;

/// A 3D vector
pub type Vec3 = DVec3;

/// A 2D point
pub type Pnt2d = DVec2;
