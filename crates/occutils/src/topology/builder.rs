//! Constructors for topological shapes

use std::f64::consts::TAU;

use glam::DVec3;

use super::{
    CompSolid, CompSolidData, Compound, CompoundData, Curve, Edge, EdgeData, Face, FaceData,
    Shape, Shell, ShellData, Solid, SolidData, Surface, Vertex, VertexData, Wire, WireData,
};
use crate::config::CONFUSION;
use crate::error::{Error, Result};
use crate::geom::{Dir, IsEqual};

impl Vertex {
    pub fn new(point: DVec3) -> Self {
        Self::from_data(VertexData { point })
    }
}

impl Edge {
    /// Edge over `[first, last]` of `curve` with fresh vertices
    ///
    /// A periodic curve trimmed to a full turn gets a single shared vertex.
    pub fn new(curve: Curve, first: f64, last: f64) -> Result<Self> {
        validate_range(first, last)?;
        let start = Vertex::new(curve.value(first));
        let end = if curve.is_periodic() && ((last - first).abs() - TAU).abs() <= CONFUSION {
            start.clone()
        } else {
            Vertex::new(curve.value(last))
        };
        Self::with_vertices(curve, first, last, &start, &end)
    }

    /// Edge over `[first, last]` of `curve` bounded by existing vertices
    pub fn with_vertices(
        curve: Curve,
        first: f64,
        last: f64,
        start: &Vertex,
        end: &Vertex,
    ) -> Result<Self> {
        validate_range(first, last)?;
        if !curve.value(first).is_equal(&start.point()) || !curve.value(last).is_equal(&end.point())
        {
            return Err(Error::ConstructionFailed(
                "Edge vertices do not lie on the curve ends".into(),
            ));
        }
        Ok(Self::from_data(EdgeData {
            curve,
            first,
            last,
            start: start.clone(),
            end: end.clone(),
        }))
    }

    /// Same geometry bounded by other (coincident) vertices
    pub(crate) fn rebound(&self, start: &Vertex, end: &Vertex) -> Self {
        let data = self.data();
        Self::from_data(EdgeData {
            curve: data.curve.clone(),
            first: data.first,
            last: data.last,
            start: start.clone(),
            end: end.clone(),
        })
    }

    /// Straight edge between two vertices
    pub fn line(start: &Vertex, end: &Vertex) -> Result<Self> {
        let direction = Dir::new(end.point() - start.point()).ok_or_else(|| {
            Error::ConstructionFailed("Line edge construction failed: points coincide".into())
        })?;
        let length = start.point().distance(end.point());
        let curve = Curve::Line {
            origin: start.point(),
            direction,
        };
        Self::with_vertices(curve, 0.0, length, start, end)
    }
}

fn validate_range(first: f64, last: f64) -> Result<()> {
    if !first.is_finite() || !last.is_finite() {
        return Err(Error::ConstructionFailed(
            "Edge parameter range must be finite".into(),
        ));
    }
    if (last - first).abs() <= CONFUSION {
        return Err(Error::ConstructionFailed(
            "Edge parameter range is empty".into(),
        ));
    }
    Ok(())
}

impl Wire {
    /// Wire from edges already in traversal order
    pub fn new(edges: Vec<Edge>) -> Self {
        Self::from_data(WireData { edges })
    }
}

impl Face {
    /// Face on `surface` bounded by `wires`, outer wire first
    pub fn new(surface: Surface, wires: Vec<Wire>) -> Self {
        Self::from_data(FaceData { surface, wires })
    }
}

impl Shell {
    pub fn new(faces: Vec<Face>) -> Self {
        Self::from_data(ShellData { faces })
    }
}

impl Solid {
    pub fn new(shells: Vec<Shell>) -> Self {
        Self::from_data(SolidData { shells })
    }
}

impl CompSolid {
    pub fn new(solids: Vec<Solid>) -> Self {
        Self::from_data(CompSolidData { solids })
    }
}

impl Compound {
    pub fn new(children: Vec<Shape>) -> Self {
        Self::from_data(CompoundData { children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ax2;

    #[test]
    fn test_line_rejects_coincident_points() {
        let a = Vertex::new(DVec3::ZERO);
        let b = Vertex::new(DVec3::ZERO);
        assert!(Edge::line(&a, &b).is_err());
    }

    #[test]
    fn test_full_circle_shares_vertex() {
        let circle = Curve::Circle {
            position: ax2::oz(),
            radius: 1.0,
        };
        let edge = Edge::new(circle, 0.0, TAU).unwrap();
        assert!(edge.is_closed());
        assert!(edge.first_vertex().is_same(&edge.last_vertex()));
    }

    #[test]
    fn test_half_circle_has_two_vertices() {
        let circle = Curve::Circle {
            position: ax2::oz(),
            radius: 1.0,
        };
        let edge = Edge::new(circle, 0.0, std::f64::consts::PI).unwrap();
        assert!(!edge.is_closed());
        assert!(edge.end_point().is_equal(&DVec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_with_vertices_checks_ends() {
        let curve = Curve::Line {
            origin: DVec3::ZERO,
            direction: Dir::X,
        };
        let a = Vertex::new(DVec3::ZERO);
        let b = Vertex::new(DVec3::new(0.0, 1.0, 0.0));
        assert!(Edge::with_vertices(curve, 0.0, 1.0, &a, &b).is_err());
    }

    #[test]
    fn test_empty_range() {
        let curve = Curve::Line {
            origin: DVec3::ZERO,
            direction: Dir::X,
        };
        assert!(Edge::new(curve, 1.0, 1.0).is_err());
    }
}
