//! Face construction and normals

use glam::DVec3;

use crate::error::{Error, Result};
use crate::geom::{Axis1, Dir, Plane};
use crate::surface;
use crate::topology::{Curve, Edge, Face, Orientation, Surface, Wire};
use crate::wire;

/// Points within this distance of the fitted plane count as planar
const PLANARITY_TOLERANCE: f64 = 1e-6;

/// Samples per curved edge when fitting a plane
const CURVE_SAMPLES: usize = 16;

/// Planar face bounded by `wire`
///
/// The wire must be closed and planar. The face normal follows the wire's
/// winding (counter-clockwise seen from the normal).
pub fn from_wire(wire: &Wire) -> Result<Face> {
    if !wire.is_closed() {
        return Err(Error::ConstructionFailed(
            "Face construction failed: wire is not closed".into(),
        ));
    }
    let points = sample_points(wire);
    let plane = fit_plane(&points).ok_or_else(|| {
        Error::ConstructionFailed("Face construction failed: wire is degenerate".into())
    })?;
    if points
        .iter()
        .any(|p| !plane.contains(*p, PLANARITY_TOLERANCE))
    {
        return Err(Error::ConstructionFailed(
            "Face construction failed: wire is not planar".into(),
        ));
    }
    Ok(Face::new(Surface::Plane(plane), vec![wire.clone()]))
}

pub fn from_edges(edges: &[Edge]) -> Result<Face> {
    from_wire(&wire::from_edges(edges)?)
}

pub fn from_edge(edge: &Edge) -> Result<Face> {
    from_wire(&wire::from_edge(edge))
}

/// Planar polygon through `points` (closed automatically)
pub fn from_points(points: &[DVec3]) -> Result<Face> {
    let wire = wire::from_points(points, true).ok_or_else(|| {
        Error::ConstructionFailed("Face construction failed: not enough distinct points".into())
    })?;
    from_wire(&wire)
}

/// Normal of `face` at surface parameters `(u, v)`, flipped for reversed
/// faces
pub fn normal(face: &Face, u: f64, v: f64, precision: f64) -> Option<Axis1> {
    surface::oriented_normal(face, u, v, precision)
}

pub fn normal_direction(face: &Face, u: f64, v: f64, precision: f64) -> Option<Dir> {
    normal(face, u, v, precision).map(|axis| axis.direction)
}

/// Points along the wire in traversal order
fn sample_points(wire: &Wire) -> Vec<DVec3> {
    let mut points = Vec::new();
    for edge in wire.edges() {
        let (first, last) = edge.range();
        let samples = match edge.curve() {
            Curve::Line { .. } => 1,
            Curve::Polyline(p) => p.len().saturating_sub(1).max(1),
            _ => CURVE_SAMPLES,
        };
        let params: Vec<f64> = (0..samples)
            .map(|i| first + (last - first) * i as f64 / samples as f64)
            .collect();
        let edge_points: Vec<DVec3> = params.iter().map(|t| edge.curve().value(*t)).collect();
        match edge.orientation() {
            Orientation::Forward => points.extend(edge_points),
            Orientation::Reversed => {
                // Walk from the last parameter back to the first
                points.push(edge.curve().value(last));
                points.extend(edge_points.into_iter().skip(1).rev());
            }
        }
    }
    points
}

/// Newell's method: plane through the centroid with the winding normal
fn fit_plane(points: &[DVec3]) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }
    let mut normal = DVec3::ZERO;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    let normal = Dir::new(normal)?;
    let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    Some(Plane::new(centroid, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge;
    use crate::topology::SurfaceType;

    #[test]
    fn test_from_points_square() {
        let face = from_points(&[
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::Y,
        ])
        .unwrap();
        assert_eq!(face.surface().surface_type(), SurfaceType::Plane);
        assert_eq!(normal_direction(&face, 0.0, 0.0, 1e-7), Some(Dir::Z));
    }

    #[test]
    fn test_winding_sets_normal() {
        let face = from_points(&[DVec3::ZERO, DVec3::Y, DVec3::X]).unwrap();
        assert_eq!(normal_direction(&face, 0.0, 0.0, 1e-7), Some(Dir::NEG_Z));
    }

    #[test]
    fn test_reversed_face_flips_normal() {
        let face = from_points(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
        let flipped = normal_direction(&face.reversed(), 0.0, 0.0, 1e-7).unwrap();
        assert_eq!(flipped, Dir::NEG_Z);
    }

    #[test]
    fn test_from_full_circle() {
        let face = from_edge(&edge::full_circle(3.0).unwrap()).unwrap();
        let dir = normal_direction(&face, 0.0, 0.0, 1e-7).unwrap();
        assert!(dir.is_parallel(&Dir::Z, 1e-9));
        assert!(dir.z() > 0.0);
    }

    #[test]
    fn test_open_wire_rejected() {
        let wire = wire::from_points(&[DVec3::ZERO, DVec3::X, DVec3::Y], false).unwrap();
        assert!(matches!(from_wire(&wire), Err(Error::ConstructionFailed(_))));
    }

    #[test]
    fn test_non_planar_rejected() {
        let result = from_points(&[
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::Y,
        ]);
        assert!(result.is_err());
    }
}
