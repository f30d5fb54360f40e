//! Primitive solids: boxes, cubes, cylinders and cones
//!
//! The topology follows the usual B-Rep conventions: a box has 8 shared
//! vertices, 12 edges and 6 planar faces; a cylinder has a lateral face, two
//! caps, two circular edges joined by a seam edge.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::CONFUSION;
use crate::error::{Error, Result};
use crate::geom::{Axis1, Axis2, Dir, Plane};
use crate::topology::{Curve, Edge, Face, Shell, Solid, Surface, Vertex, Wire};

/// Where the primitive sits relative to its origin point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionCentering {
    /// Origin is the minimum corner (box) or base center (cylinder)
    #[default]
    DoNotCenter,
    /// Centered along X (box)
    CenterX,
    /// Centered along Y (box)
    CenterY,
    /// Centered along Z (box)
    CenterZ,
    /// Centered along the length (cylinder)
    CenterL,
    /// Centered on the diameter and along the length (cylinder)
    CenterD,
}

/// Axis a cylinder extends along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    X,
    Y,
    #[default]
    Z,
}

impl Orientation {
    pub fn direction(self) -> Dir {
        match self {
            Orientation::X => Dir::X,
            Orientation::Y => Dir::Y,
            Orientation::Z => Dir::Z,
        }
    }
}

/// Axis-aligned box of the given size
///
/// `CenterX`, `CenterY` and `CenterZ` center the box on `origin` along that
/// axis only; the other modes put the minimum corner at `origin`.
pub fn make_box(
    x_size: f64,
    y_size: f64,
    z_size: f64,
    center: PositionCentering,
    origin: DVec3,
) -> Result<Solid> {
    let mut corner = origin;
    match center {
        PositionCentering::CenterX => corner.x -= x_size / 2.0,
        PositionCentering::CenterY => corner.y -= y_size / 2.0,
        PositionCentering::CenterZ => corner.z -= z_size / 2.0,
        _ => {}
    }
    box_solid(corner, DVec3::new(x_size, y_size, z_size))
}

/// Box spanned by two opposite corners (in any order)
pub fn make_box_from_corners(a: DVec3, b: DVec3) -> Result<Solid> {
    let min = a.min(b);
    let max = a.max(b);
    box_solid(min, max - min)
}

pub fn make_box_from_pair(corners: (DVec3, DVec3)) -> Result<Solid> {
    make_box_from_corners(corners.0, corners.1)
}

pub fn make_cube(size: f64, center: PositionCentering, origin: DVec3) -> Result<Solid> {
    make_box(size, size, size, center, origin)
}

/// Cylinder whose base circle is centered on `origin`
///
/// `CenterL` and `CenterD` move the cylinder back by half its length so that
/// it is centered on `origin`. The per-axis box modes do not apply.
pub fn make_cylinder(
    diameter: f64,
    length: f64,
    orientation: Orientation,
    center: PositionCentering,
    origin: DVec3,
) -> Result<Solid> {
    check_size("diameter", diameter)?;
    check_size("length", length)?;
    let direction = orientation.direction();
    let base = match center {
        PositionCentering::CenterL | PositionCentering::CenterD => {
            origin - direction * (length / 2.0)
        }
        _ => origin,
    };
    revolved_solid(Axis2::new(base, direction), diameter / 2.0, diameter / 2.0, length)
}

/// Truncated cone along `axis` with `diameter1` at the base and `diameter2`
/// at the top. One diameter may be zero, giving a pointed cone.
pub fn make_cone(
    axis: &Axis1,
    diameter1: f64,
    diameter2: f64,
    length: f64,
    center_length: bool,
) -> Result<Solid> {
    check_size("length", length)?;
    if diameter1 < 0.0 || diameter2 < 0.0 || !diameter1.is_finite() || !diameter2.is_finite() {
        return Err(Error::ConstructionFailed(
            "Cone diameters must not be negative".into(),
        ));
    }
    if (diameter1 - diameter2).abs() <= CONFUSION {
        return Err(Error::ConstructionFailed(
            "Cone diameters must differ (use a cylinder)".into(),
        ));
    }
    let base = if center_length {
        axis.location - axis.direction * (length / 2.0)
    } else {
        axis.location
    };
    revolved_solid(
        Axis2::new(base, axis.direction),
        diameter1 / 2.0,
        diameter2 / 2.0,
        length,
    )
}

fn check_size(name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value <= CONFUSION {
        return Err(Error::ConstructionFailed(format!(
            "Primitive {} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

fn box_solid(corner: DVec3, size: DVec3) -> Result<Solid> {
    check_size("x size", size.x)?;
    check_size("y size", size.y)?;
    check_size("z size", size.z)?;

    // Corner i has x from bit 0, y from bit 1, z from bit 2
    let vertices: Vec<Vertex> = (0..8)
        .map(|i| {
            let offset = DVec3::new(
                if i & 1 != 0 { size.x } else { 0.0 },
                if i & 2 != 0 { size.y } else { 0.0 },
                if i & 4 != 0 { size.z } else { 0.0 },
            );
            Vertex::new(corner + offset)
        })
        .collect();

    // Counter-clockwise seen from outside
    const FACES: [[usize; 4]; 6] = [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ];

    let mut edges: HashMap<(usize, usize), Edge> = HashMap::new();
    let mut faces = Vec::with_capacity(FACES.len());
    for loop_indices in FACES {
        let mut wire_edges = Vec::with_capacity(4);
        for k in 0..4 {
            let (a, b) = (loop_indices[k], loop_indices[(k + 1) % 4]);
            let key = (a.min(b), a.max(b));
            let edge = match edges.get(&key) {
                Some(edge) => edge.clone(),
                None => {
                    let edge = Edge::line(&vertices[key.0], &vertices[key.1])?;
                    edges.insert(key, edge.clone());
                    edge
                }
            };
            wire_edges.push(if a < b { edge } else { edge.reversed() });
        }

        let p0 = vertices[loop_indices[0]].point();
        let p1 = vertices[loop_indices[1]].point();
        let p3 = vertices[loop_indices[3]].point();
        let x_dir = Dir::new(p1 - p0);
        let normal = Dir::new((p1 - p0).cross(p3 - p0));
        let frame = match (normal, x_dir) {
            (Some(normal), Some(x_dir)) => Axis2::with_x_direction(p0, normal, x_dir),
            _ => None,
        }
        .ok_or_else(|| Error::ConstructionFailed("Degenerate box face".into()))?;

        faces.push(Face::new(
            Surface::Plane(Plane::from_frame(frame)),
            vec![Wire::new(wire_edges)],
        ));
    }

    Ok(Solid::new(vec![Shell::new(faces)]))
}

/// Solid of revolution of a straight generatrix: cylinder when the radii
/// match, cone otherwise
fn revolved_solid(frame: Axis2, radius1: f64, radius2: f64, length: f64) -> Result<Solid> {
    let direction = frame.direction;
    let top_frame = Axis2 {
        location: frame.location + direction * length,
        ..frame
    };
    let rim = |f: &Axis2, r: f64| f.point_at(r, 0.0, 0.0);

    let circle = |f: Axis2, r: f64| -> Result<Option<Edge>> {
        if r <= CONFUSION {
            return Ok(None);
        }
        Ok(Some(Edge::new(
            Curve::Circle {
                position: f,
                radius: r,
            },
            0.0,
            TAU,
        )?))
    };
    let bottom = circle(frame, radius1)?;
    let top = circle(top_frame, radius2)?;

    let bottom_vertex = match &bottom {
        Some(edge) => edge.first_vertex(),
        None => Vertex::new(rim(&frame, 0.0)),
    };
    let top_vertex = match &top {
        Some(edge) => edge.first_vertex(),
        None => Vertex::new(rim(&top_frame, 0.0)),
    };
    let seam = Edge::line(&bottom_vertex, &top_vertex)?;

    let mut lateral_edges = Vec::with_capacity(4);
    if let Some(edge) = &bottom {
        lateral_edges.push(edge.clone());
    }
    lateral_edges.push(seam.clone());
    if let Some(edge) = &top {
        lateral_edges.push(edge.reversed());
    }
    lateral_edges.push(seam.reversed());

    let lateral_surface = if (radius1 - radius2).abs() <= CONFUSION {
        Surface::Cylinder {
            position: frame,
            radius: radius1,
        }
    } else {
        Surface::Cone {
            position: frame,
            ref_radius: radius1,
            semi_angle: ((radius2 - radius1) / length).atan(),
        }
    };

    let mut faces = vec![Face::new(lateral_surface, vec![Wire::new(lateral_edges)])];
    if let Some(edge) = top {
        faces.push(Face::new(
            Surface::Plane(Plane::from_frame(top_frame)),
            vec![Wire::new(vec![edge])],
        ));
    }
    if let Some(edge) = bottom {
        let bottom_frame =
            Axis2::with_x_direction(frame.location, direction.reversed(), frame.x_direction)
                .unwrap_or(frame);
        faces.push(Face::new(
            Surface::Plane(Plane::from_frame(bottom_frame)),
            vec![Wire::new(vec![edge.reversed()])],
        ));
    }

    Ok(Solid::new(vec![Shell::new(faces)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox;
    use crate::geom::{IsEqual, ax1};
    use crate::shape_components::{count_x, count_solids};
    use crate::topology::{ShapeType, SurfaceType};
    use approx::assert_relative_eq;

    #[test]
    fn test_box_topology() {
        let solid = make_box(1.0, 2.0, 3.0, PositionCentering::DoNotCenter, DVec3::ZERO)
            .unwrap()
            .as_shape();
        assert_eq!(count_solids(&solid), 1);
        assert_eq!(count_x(&solid, ShapeType::Face), 6);
        assert_eq!(count_x(&solid, ShapeType::Edge), 12);
        assert_eq!(count_x(&solid, ShapeType::Vertex), 8);
    }

    #[test]
    fn test_box_faces_point_outwards() {
        let solid = make_cube(2.0, PositionCentering::DoNotCenter, DVec3::ZERO).unwrap();
        let center = DVec3::splat(1.0);
        for shell in solid.shells() {
            for face in shell.faces() {
                let Surface::Plane(plane) = face.surface() else {
                    panic!("box faces are planar");
                };
                assert!(plane.signed_distance(center) < 0.0);
            }
        }
    }

    #[test]
    fn test_box_centering() {
        let solid = make_box(2.0, 4.0, 6.0, PositionCentering::CenterY, DVec3::ZERO).unwrap();
        let (min, max) = bbox::bounding_box(&solid.as_shape()).unwrap();
        assert!(min.is_equal(&DVec3::new(0.0, -2.0, 0.0)));
        assert!(max.is_equal(&DVec3::new(2.0, 2.0, 6.0)));

        let solid = make_box(2.0, 4.0, 6.0, PositionCentering::CenterL, DVec3::ONE).unwrap();
        let (min, _) = bbox::bounding_box(&solid.as_shape()).unwrap();
        assert!(min.is_equal(&DVec3::ONE));
    }

    #[test]
    fn test_box_from_corners_normalizes() {
        let corners = (DVec3::new(1.0, 1.0, 1.0), DVec3::new(-1.0, 0.0, 3.0));
        let solid = make_box_from_pair(corners).unwrap();
        let (min, max) = bbox::bounding_box(&solid.as_shape()).unwrap();
        assert!(min.is_equal(&DVec3::new(-1.0, 0.0, 1.0)));
        assert!(max.is_equal(&DVec3::new(1.0, 1.0, 3.0)));
    }

    #[test]
    fn test_box_rejects_flat_size() {
        let result = make_box(1.0, 0.0, 1.0, PositionCentering::DoNotCenter, DVec3::ZERO);
        assert!(matches!(result, Err(Error::ConstructionFailed(_))));
    }

    #[test]
    fn test_cylinder_topology() {
        let solid = make_cylinder(
            2.0,
            5.0,
            Orientation::Z,
            PositionCentering::DoNotCenter,
            DVec3::ZERO,
        )
        .unwrap()
        .as_shape();
        assert_eq!(count_x(&solid, ShapeType::Face), 3);
        assert_eq!(count_x(&solid, ShapeType::Edge), 3);
        assert_eq!(count_x(&solid, ShapeType::Vertex), 2);
    }

    #[test]
    fn test_cylinder_centering() {
        let solid = make_cylinder(
            2.0,
            10.0,
            Orientation::X,
            PositionCentering::CenterL,
            DVec3::ZERO,
        )
        .unwrap();
        let (min, max) = bbox::bounding_box(&solid.as_shape()).unwrap();
        assert_relative_eq!(min.x, -5.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(min.y, -1.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 1.0, epsilon = 1e-9);

        let plain = make_cylinder(
            2.0,
            10.0,
            Orientation::Y,
            PositionCentering::DoNotCenter,
            DVec3::ZERO,
        )
        .unwrap();
        let (min, max) = bbox::bounding_box(&plain.as_shape()).unwrap();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pointed_cone() {
        let solid = make_cone(&ax1::oz(), 4.0, 0.0, 3.0, false).unwrap().as_shape();
        assert_eq!(count_x(&solid, ShapeType::Face), 2);

        let faces = crate::shape_components::all_faces_within(&solid);
        assert_eq!(faces[0].surface().surface_type(), SurfaceType::Cone);

        let (min, max) = bbox::bounding_box(&solid).unwrap();
        assert_relative_eq!(max.z, 3.0, epsilon = 1e-9);
        assert_relative_eq!(min.x, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cone_center_length() {
        let solid = make_cone(&ax1::oz(), 2.0, 1.0, 4.0, true).unwrap();
        let (min, max) = bbox::bounding_box(&solid.as_shape()).unwrap();
        assert_relative_eq!(min.z, -2.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 2.0, epsilon = 1e-9);
        assert_eq!(count_x(&solid.as_shape(), ShapeType::Face), 3);
    }

    #[test]
    fn test_cone_rejects_bad_diameters() {
        assert!(make_cone(&ax1::oz(), 1.0, 1.0, 1.0, false).is_err());
        assert!(make_cone(&ax1::oz(), -1.0, 0.0, 1.0, false).is_err());
        assert!(make_cone(&ax1::oz(), 1.0, 0.0, 0.0, false).is_err());
    }
}
