//! Infinite planes

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{Axis1, Axis2, Dir, IsEqual};
use crate::config::ANGULAR;
use crate::error::{Error, Result};

/// A plane given by a coordinate frame; the frame's main direction is the normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub position: Axis2,
}

impl Plane {
    pub fn new(location: DVec3, normal: Dir) -> Self {
        Self {
            position: Axis2::new(location, normal),
        }
    }

    pub fn from_frame(position: Axis2) -> Self {
        Self { position }
    }

    /// The XY plane
    pub fn xy() -> Self {
        Self::new(DVec3::ZERO, Dir::Z)
    }

    pub fn location(&self) -> DVec3 {
        self.position.location
    }

    pub fn normal(&self) -> Dir {
        self.position.direction
    }

    pub fn axis(&self) -> Axis1 {
        self.position.axis()
    }

    /// Point at in-plane coordinates `(u, v)`
    pub fn value(&self, u: f64, v: f64) -> DVec3 {
        self.position.point_at(u, v, 0.0)
    }

    /// In-plane coordinates of the projection of `pnt`
    pub fn parameters(&self, pnt: DVec3) -> (f64, f64) {
        let local = self.position.to_local(pnt);
        (local.x, local.y)
    }

    /// Signed distance along the normal
    pub fn signed_distance(&self, pnt: DVec3) -> f64 {
        (pnt - self.location()).dot(self.normal().get())
    }

    pub fn contains(&self, pnt: DVec3, tolerance: f64) -> bool {
        self.signed_distance(pnt).abs() <= tolerance
    }
}

/// Plane through `p_o` spanned by `p_o -> p_x` (X direction) and `p_o -> p_y`
///
/// The two spanning directions must be perpendicular.
pub fn from_points(p_o: DVec3, p_x: DVec3, p_y: DVec3) -> Result<Plane> {
    if p_o.is_equal(&p_x) {
        return Err(Error::ConstructionFailed(
            "Plane construction failed: pO coincides with pX".into(),
        ));
    }
    if p_o.is_equal(&p_y) {
        return Err(Error::ConstructionFailed(
            "Plane construction failed: pO coincides with pY".into(),
        ));
    }
    if p_x.is_equal(&p_y) {
        return Err(Error::ConstructionFailed(
            "Plane construction failed: pX coincides with pY".into(),
        ));
    }

    let (Some(x_axis), Some(y_axis)) = (Dir::new(p_x - p_o), Dir::new(p_y - p_o)) else {
        return Err(Error::ConstructionFailed(
            "Plane construction failed: degenerate axes".into(),
        ));
    };
    if !x_axis.is_normal(&y_axis, ANGULAR) {
        return Err(Error::ConstructionFailed(
            "Plane construction failed: Axes are not normal to each other".into(),
        ));
    }

    let normal = x_axis.cross(&y_axis).ok_or_else(|| {
        Error::ConstructionFailed("Plane construction failed: Axes are parallel".into())
    })?;
    Ok(Plane::from_frame(Axis2 {
        location: p_o,
        direction: normal,
        x_direction: x_axis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let plane = from_points(
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(3.0, 1.0, 1.0),
            DVec3::new(1.0, 2.0, 1.0),
        )
        .unwrap();
        assert_eq!(plane.normal(), Dir::Z);
        assert_eq!(plane.position.x_direction, Dir::X);
        assert_eq!(plane.location(), DVec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_points_coincident() {
        let err = from_points(DVec3::ZERO, DVec3::ZERO, DVec3::Y).unwrap_err();
        assert!(err.to_string().contains("pO coincides with pX"));

        let err = from_points(DVec3::ZERO, DVec3::X, DVec3::ZERO).unwrap_err();
        assert!(err.to_string().contains("pO coincides with pY"));

        let err = from_points(DVec3::ZERO, DVec3::X, DVec3::X).unwrap_err();
        assert!(err.to_string().contains("pX coincides with pY"));
    }

    #[test]
    fn test_from_points_not_normal() {
        let err = from_points(DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::ConstructionFailed(_)));
        assert!(err.to_string().contains("not normal"));
    }

    #[test]
    fn test_parameters() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 2.0), Dir::Z);
        let (u, v) = plane.parameters(DVec3::new(3.0, 4.0, 7.0));
        assert_eq!((u, v), (3.0, 4.0));
        assert_eq!(plane.signed_distance(DVec3::new(0.0, 0.0, 7.0)), 5.0);
        assert_eq!(plane.value(3.0, 4.0), DVec3::new(3.0, 4.0, 2.0));
    }
}
