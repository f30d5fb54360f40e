//! Surfaces underlying faces

use crate::geom::{Axis1, Dir};
pub use crate::topology::{Surface, SurfaceType};
use crate::topology::{Face, Orientation};

/// The surface of `face`
pub fn from_face(face: &Face) -> Surface {
    face.surface().clone()
}

/// Normal axis of `surface` at `(u, v)`, located on the surface
///
/// `None` where the surface has no analytic form or the normal is shorter
/// than `precision` (degenerate points such as a cone apex).
pub fn normal(surface: &Surface, u: f64, v: f64, precision: f64) -> Option<Axis1> {
    let location = surface.value(u, v)?;
    let direction = normal_direction(surface, u, v, precision)?;
    Some(Axis1::new(location, direction))
}

pub fn normal_direction(surface: &Surface, u: f64, v: f64, precision: f64) -> Option<Dir> {
    let vector = surface.normal_vector(u, v)?;
    if vector.length() <= precision {
        return None;
    }
    Dir::new(vector)
}

/// Surface normal flipped for reversed faces
pub(crate) fn oriented_normal(face: &Face, u: f64, v: f64, precision: f64) -> Option<Axis1> {
    let axis = normal(face.surface(), u, v, precision)?;
    Some(match face.orientation() {
        Orientation::Forward => axis,
        Orientation::Reversed => axis.reversed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Plane, ax2};
    use glam::DVec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_plane_normal() {
        let surface = Surface::Plane(Plane::new(DVec3::new(0.0, 0.0, 1.0), Dir::Z));
        let axis = normal(&surface, 2.0, 3.0, 1e-7).unwrap();
        assert_eq!(axis.direction, Dir::Z);
        assert_eq!(axis.location, DVec3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn test_cylinder_normal_direction() {
        let surface = Surface::Cylinder {
            position: ax2::oz(),
            radius: 2.0,
        };
        let dir = normal_direction(&surface, FRAC_PI_2, 0.0, 1e-7).unwrap();
        assert!(dir.is_parallel(&Dir::Y, 1e-12));
        assert!(dir.y() > 0.0);
    }

    #[test]
    fn test_other_surface_has_no_normal() {
        assert!(normal(&Surface::Other, 0.0, 0.0, 1e-7).is_none());
    }
}
