//! Axis-aligned bounding boxes and their dimensionality

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geom::point;
use crate::primitive;
use crate::topology::{Curve, Edge, Face, Shape, Vertex, Wire, explore_typed};

/// Axis-aligned box, possibly void
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    corners: Option<(DVec3, DVec3)>,
}

impl BoundingBox {
    /// A void box
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_corners(a: DVec3, b: DVec3) -> Self {
        Self {
            corners: Some((a.min(b), a.max(b))),
        }
    }

    pub fn update_point(&mut self, pnt: DVec3) {
        self.corners = Some(match self.corners {
            Some((min, max)) => (min.min(pnt), max.max(pnt)),
            None => (pnt, pnt),
        });
    }

    /// Extend by the box `[x_min..x_max] x [y_min..y_max] x [z_min..z_max]`
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        x_min: f64,
        y_min: f64,
        z_min: f64,
        x_max: f64,
        y_max: f64,
        z_max: f64,
    ) {
        self.add(&Self::from_corners(
            DVec3::new(x_min, y_min, z_min),
            DVec3::new(x_max, y_max, z_max),
        ));
    }

    pub fn add(&mut self, other: &BoundingBox) {
        if let Some((min, max)) = other.corners {
            self.update_point(min);
            self.update_point(max);
        }
    }

    /// Grow by `gap` on every side
    pub fn enlarge(&mut self, gap: f64) {
        if let Some((min, max)) = self.corners {
            let gap = DVec3::splat(gap.abs());
            self.corners = Some((min - gap, max + gap));
        }
    }

    pub fn is_void(&self) -> bool {
        self.corners.is_none()
    }

    pub fn corner_min(&self) -> Option<DVec3> {
        self.corners.map(|(min, _)| min)
    }

    pub fn corner_max(&self) -> Option<DVec3> {
        self.corners.map(|(_, max)| max)
    }

    pub fn get(&self) -> Option<(DVec3, DVec3)> {
        self.corners
    }

    /// Extent along each axis; zero for a void box
    pub fn size(&self) -> DVec3 {
        self.corners
            .map(|(min, max)| max - min)
            .unwrap_or(DVec3::ZERO)
    }

    pub fn is_x_thin(&self, tolerance: f64) -> bool {
        self.is_thin(0, tolerance)
    }

    pub fn is_y_thin(&self, tolerance: f64) -> bool {
        self.is_thin(1, tolerance)
    }

    pub fn is_z_thin(&self, tolerance: f64) -> bool {
        self.is_thin(2, tolerance)
    }

    fn is_thin(&self, axis: usize, tolerance: f64) -> bool {
        match self.corners {
            Some((min, max)) => (max[axis] - min[axis]).abs() < tolerance,
            None => true,
        }
    }

    fn thin_axes(&self, tolerance: f64) -> usize {
        [
            self.is_x_thin(tolerance),
            self.is_y_thin(tolerance),
            self.is_z_thin(tolerance),
        ]
        .into_iter()
        .filter(|thin| *thin)
        .count()
    }
}

/// Exact box of all vertices and edge curves of `shape`
pub fn of_shape(shape: &Shape) -> BoundingBox {
    let mut bbox = BoundingBox::new();
    for vertex in explore_typed::<Vertex>(shape) {
        bbox.update_point(vertex.point());
    }
    for edge in explore_typed::<Edge>(shape) {
        add_edge(&mut bbox, &edge);
    }
    bbox
}

/// `(min, max)` corners of `shape`, `None` for an empty shape
pub fn bounding_box(shape: &Shape) -> Option<(DVec3, DVec3)> {
    of_shape(shape).get()
}

pub fn size(shape: &Shape) -> DVec3 {
    of_shape(shape).size()
}

/// Volume of the bounding box (not of the shape)
pub fn volume(shape: &Shape) -> f64 {
    let size = size(shape);
    size.x * size.y * size.z
}

/// Exactly two thin axes
pub fn is_1d(bbox: &BoundingBox, tolerance: f64) -> bool {
    !bbox.is_void() && bbox.thin_axes(tolerance) == 2
}

/// Exactly one thin axis
pub fn is_2d(bbox: &BoundingBox, tolerance: f64) -> bool {
    !bbox.is_void() && bbox.thin_axes(tolerance) == 1
}

/// No thin axis
pub fn is_3d(bbox: &BoundingBox, tolerance: f64) -> bool {
    !bbox.is_void() && bbox.thin_axes(tolerance) == 0
}

/// Shape that fills the box: an edge, a rectangle or a box solid
///
/// `None` for a void box or one that is thin in every direction.
pub fn shape(bbox: &BoundingBox, tolerance: f64) -> Result<Option<Shape>> {
    let Some((min, max)) = bbox.get() else {
        return Ok(None);
    };
    if is_1d(bbox, tolerance) {
        let edge = Edge::line(&Vertex::new(min), &Vertex::new(max))?;
        return Ok(Some(edge.into()));
    }
    if is_2d(bbox, tolerance) {
        let corners: Vec<DVec3> = (0..8)
            .map(|i| {
                DVec3::new(
                    if i & 1 != 0 { max.x } else { min.x },
                    if i & 2 != 0 { max.y } else { min.y },
                    if i & 4 != 0 { max.z } else { min.z },
                )
            })
            .collect();
        let unique = point::unique_sorted(&corners, tolerance);
        if unique.len() != 4 {
            return Ok(None);
        }
        let outline = [unique[0], unique[1], unique[3], unique[2]];
        return Ok(Some(rectangle(&outline)?.into()));
    }
    if is_3d(bbox, tolerance) {
        return Ok(Some(primitive::make_box_from_corners(min, max)?.into()));
    }
    Ok(None)
}

fn rectangle(outline: &[DVec3; 4]) -> Result<Face> {
    let vertices: Vec<Vertex> = outline.iter().map(|p| Vertex::new(*p)).collect();
    let edges = (0..4)
        .map(|i| Edge::line(&vertices[i], &vertices[(i + 1) % 4]))
        .collect::<Result<Vec<_>>>()?;
    crate::face::from_wire(&Wire::new(edges))
}

fn add_edge(bbox: &mut BoundingBox, edge: &Edge) {
    let (first, last) = edge.range();
    let (lo, hi) = (first.min(last), first.max(last));
    let curve = edge.curve();
    bbox.update_point(curve.value(lo));
    bbox.update_point(curve.value(hi));
    match curve {
        Curve::Line { .. } => {}
        Curve::Polyline(points) => {
            for p in points {
                bbox.update_point(*p);
            }
        }
        Curve::Circle { position, radius } => {
            let u = position.x_direction.get() * *radius;
            let v = position.y_direction().get() * *radius;
            conic_extremes(bbox, curve, u, v, lo, hi);
        }
        Curve::Ellipse {
            position,
            major_radius,
            minor_radius,
        } => {
            conic_extremes(
                bbox,
                curve,
                position.x_direction.get() * *major_radius,
                position.y_direction().get() * *minor_radius,
                lo,
                hi,
            );
        }
    }
}

/// Add the per-axis extremes of `c + a cos t + b sin t` that fall in `[lo, hi]`
fn conic_extremes(bbox: &mut BoundingBox, curve: &Curve, a: DVec3, b: DVec3, lo: f64, hi: f64) {
    for axis in 0..3 {
        let base = b[axis].atan2(a[axis]);
        for candidate in [base, base + PI] {
            // Shift into the first period at or above `lo`
            let t = lo + (candidate - lo).rem_euclid(TAU);
            if t <= hi {
                bbox.update_point(curve.value(t));
            }
        }
    }
}
