//! Point helpers

use std::cmp::Ordering;

use glam::{DVec2, DVec3};

use super::{Axis1, Axis2d};
use crate::config::CONFUSION;

pub fn origin() -> DVec3 {
    DVec3::ZERO
}

/// Lift a 2D point into the XY plane
pub fn from_2d(pnt: DVec2) -> DVec3 {
    DVec3::new(pnt.x, pnt.y, 0.0)
}

pub fn from_xy(x: f64, y: f64) -> DVec3 {
    DVec3::new(x, y, 0.0)
}

/// Average of `points`, `None` for an empty slice
pub fn midpoint(points: &[DVec3]) -> Option<DVec3> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec3 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}

/// Distance of `pnt` from the line of `axis`
pub fn distance(pnt: DVec3, axis: &Axis1) -> f64 {
    super::axis::distance(axis, pnt)
}

/// Foot of the perpendicular from `pnt` onto the line of `axis`
pub fn orthogonal_project_onto(pnt: DVec3, axis: &Axis1) -> DVec3 {
    let dir = axis.direction.get();
    axis.location + dir * (pnt - axis.location).dot(dir)
}

pub fn orthogonal_project_onto_2d(pnt: DVec2, axis: &Axis2d) -> DVec2 {
    let dir = axis.direction.get();
    axis.location + dir * (pnt - axis.location).dot(dir)
}

/// Lexicographic X, Y, Z ordering treating coordinates closer than `tol` as equal
pub fn compare(a: DVec3, b: DVec3, tol: f64) -> Ordering {
    for (ca, cb) in [(a.x, b.x), (a.y, b.y), (a.z, b.z)] {
        if (ca - cb).abs() > tol {
            return ca.partial_cmp(&cb).unwrap_or(Ordering::Equal);
        }
    }
    Ordering::Equal
}

/// Sort and deduplicate points with [`compare`]
pub fn unique_sorted(points: &[DVec3], tol: f64) -> Vec<DVec3> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| compare(*a, *b, tol));
    sorted.dedup_by(|a, b| compare(*a, *b, tol) == Ordering::Equal);
    sorted
}

/// Same as [`compare`] with the default confusion tolerance
pub fn compare_default(a: DVec3, b: DVec3) -> Ordering {
    compare(a, b, CONFUSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Dir, Dir2d, ax1};
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint() {
        let mid = midpoint(&[DVec3::ZERO, DVec3::new(2.0, 4.0, 6.0)]).unwrap();
        assert_eq!(mid, DVec3::new(1.0, 2.0, 3.0));
        assert!(midpoint(&[]).is_none());
    }

    #[test]
    fn test_projection() {
        let projected = orthogonal_project_onto(DVec3::new(1.0, 2.0, 5.0), &ax1::oz());
        assert_eq!(projected, DVec3::new(0.0, 0.0, 5.0));

        let axis = Axis2d::new(DVec2::new(0.0, 1.0), Dir2d::X);
        let projected = orthogonal_project_onto_2d(DVec2::new(3.0, -2.0), &axis);
        assert_eq!(projected, DVec2::new(3.0, 1.0));
    }

    #[test]
    fn test_distance() {
        let axis = Axis1::new(DVec3::new(0.0, 0.0, 1.0), Dir::X);
        assert_relative_eq!(distance(DVec3::new(5.0, 0.0, 4.0), &axis), 3.0);
    }

    #[test]
    fn test_compare() {
        let a = DVec3::new(0.0, 1.0, 0.0);
        let b = DVec3::new(0.0, 0.0, 5.0);
        assert_eq!(compare(a, b, 1e-7), Ordering::Greater);
        assert_eq!(compare(b, a, 1e-7), Ordering::Less);
        assert_eq!(compare(a, a + DVec3::splat(1e-9), 1e-7), Ordering::Equal);
    }

    #[test]
    fn test_unique_sorted() {
        let points = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 1e-9),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let unique = unique_sorted(&points, 1e-7);
        assert_eq!(unique.len(), 3);
        assert_eq!(unique[0], DVec3::ZERO);
        assert_eq!(unique[1], DVec3::new(0.0, 1.0, 0.0));
    }
}
