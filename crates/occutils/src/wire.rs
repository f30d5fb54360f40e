//! Wire construction

use std::collections::VecDeque;

use glam::DVec3;

use crate::edge;
use crate::error::{Error, Result};
use crate::face;
use crate::geom::{Axis2, Dir, IsEqual};
use crate::kernel::Kernel;
use crate::pipe;
use crate::topology::{Edge, Orientation, Shape, Vertex, Wire};

/// Wire made of a single edge
pub fn from_edge(edge: &Edge) -> Wire {
    Wire::new(vec![edge.clone()])
}

/// Connect edges into a wire
///
/// Each edge must touch the wire built so far at one of its ends; edges
/// are reversed as needed and coincident vertices are merged.
pub fn from_edges(edges: &[Edge]) -> Result<Wire> {
    let Some((head, tail)) = edges.split_first() else {
        return Err(Error::ConstructionFailed(
            "Wire construction failed: no edges given".into(),
        ));
    };

    let mut chain: VecDeque<Edge> = VecDeque::from([head.clone()]);
    for (index, edge) in tail.iter().enumerate() {
        let (Some(front), Some(back)) = (chain.front(), chain.back()) else {
            break;
        };
        let wire_start = front.first_vertex();
        let wire_end = back.last_vertex();

        if touches(&edge.first_vertex(), &wire_end) {
            chain.push_back(rebind(edge, Some(&wire_end), None));
        } else if touches(&edge.last_vertex(), &wire_end) {
            chain.push_back(rebind(&edge.reversed(), Some(&wire_end), None));
        } else if touches(&edge.last_vertex(), &wire_start) {
            chain.push_front(rebind(edge, None, Some(&wire_start)));
        } else if touches(&edge.first_vertex(), &wire_start) {
            chain.push_front(rebind(&edge.reversed(), None, Some(&wire_start)));
        } else {
            return Err(Error::ConstructionFailed(format!(
                "Wire construction failed: edge {} is disconnected",
                index + 1
            )));
        }
    }

    // Close the loop on a shared vertex when the ends coincide
    if chain.len() > 1
        && let (Some(front), Some(back)) = (chain.front(), chain.back())
    {
        let wire_start = front.first_vertex();
        if !back.last_vertex().is_same(&wire_start) && touches(&back.last_vertex(), &wire_start)
        {
            let closed = rebind(back, None, Some(&wire_start));
            chain.pop_back();
            chain.push_back(closed);
        }
    }

    Ok(Wire::new(chain.into()))
}

fn touches(a: &Vertex, b: &Vertex) -> bool {
    a.is_same(b) || a.point().is_equal(&b.point())
}

/// `edge` with its first / last vertex (in traversal order) replaced
fn rebind(edge: &Edge, first: Option<&Vertex>, last: Option<&Vertex>) -> Edge {
    let forward = edge.oriented(Orientation::Forward);
    let (old_start, old_end) = (forward.first_vertex(), forward.last_vertex());
    let (mut start, mut end) = (old_start.clone(), old_end.clone());
    match edge.orientation() {
        Orientation::Forward => {
            if let Some(v) = first {
                start = v.clone();
            }
            if let Some(v) = last {
                end = v.clone();
            }
        }
        Orientation::Reversed => {
            if let Some(v) = first {
                end = v.clone();
            }
            if let Some(v) = last {
                start = v.clone();
            }
        }
    }
    if start.is_same(&old_start) && end.is_same(&old_end) {
        return edge.clone();
    }
    forward
        .rebound(&start, &end)
        .oriented(edge.orientation())
}

/// Polyline wire through `points`
///
/// Returns `None` for fewer than two (distinct) points or if any segment
/// cannot be built (non-finite coordinates). Consecutive duplicates are
/// skipped. With `close`, an edge from the last back to the
/// first point is added unless they already coincide.
pub fn from_points(points: &[DVec3], close: bool) -> Option<Wire> {
    if points.len() < 2 {
        return None;
    }
    let mut distinct: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if distinct.last().is_none_or(|last| !last.is_equal(p)) {
            distinct.push(*p);
        }
    }

    // A trailing copy of the first point closes the polyline by itself
    let mut closed = close;
    if distinct.len() > 2
        && let (Some(first), Some(last)) = (distinct.first(), distinct.last())
        && first.is_equal(last)
    {
        distinct.pop();
        closed = true;
    }
    if distinct.len() < 2 {
        return None;
    }

    let vertices: Vec<Vertex> = distinct.iter().map(|p| Vertex::new(*p)).collect();
    let mut edges: Vec<Edge> = vertices
        .windows(2)
        .map(|pair| Edge::line(&pair[0], &pair[1]).ok())
        .collect::<Option<_>>()?;
    if closed && let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
        edges.push(Edge::line(last, first).ok()?);
    }
    Some(Wire::new(edges))
}

/// Builds a wire step by step from relative moves
///
/// ```
/// use occutils::geom::{DVec3, Dir};
/// use occutils::wire::IncrementalBuilder;
///
/// let mut builder = IncrementalBuilder::new(DVec3::ZERO);
/// builder.line(10.0, 0.0, 0.0);
/// builder.arc90(5.0, 5.0, 0.0, 0.0, 5.0, 0.0, Dir::Z).unwrap();
/// builder.line(0.0, 10.0, 0.0);
/// let wire = builder.wire().unwrap();
/// assert_eq!(wire.edges().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalBuilder {
    current: DVec3,
    direction: Option<Dir>,
    edges: Vec<Edge>,
}

impl IncrementalBuilder {
    pub fn new(start: DVec3) -> Self {
        Self {
            current: start,
            direction: None,
            edges: Vec::new(),
        }
    }

    /// Straight segment by `(dx, dy, dz)`. A zero move adds nothing.
    pub fn line(&mut self, dx: f64, dy: f64, dz: f64) {
        let from = self.current;
        let to = from + DVec3::new(dx, dy, dz);
        if let Some(edge) = edge::from_points(from, to) {
            self.edges.push(edge);
            self.direction = Dir::new(to - from);
        }
        self.current = to;
    }

    /// Quarter arc to `current + (dx, dy, dz)` around
    /// `current + (center_dx, center_dy, center_dz)` in the plane normal to
    /// `normal`
    ///
    /// Of the two arcs joining the points the shorter one is used. Afterwards
    /// the direction points from the arc start towards the center.
    #[allow(clippy::too_many_arguments)]
    pub fn arc90(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        center_dx: f64,
        center_dy: f64,
        center_dz: f64,
        normal: Dir,
    ) -> Result<()> {
        let p2 = self.current + DVec3::new(dx, dy, dz);
        let center = self.current + DVec3::new(center_dx, center_dy, center_dz);
        let resulting_direction = Dir::new(center - self.current).ok_or_else(|| {
            Error::InvalidArgument("Arc center coincides with the current point".into())
        })?;

        let radius = self.current.distance(center);
        if (radius - p2.distance(center)).abs() >= crate::config::CONFUSION {
            return Err(Error::InvalidArgument(
                "dx/dy/dz does not match center dx/dy/dz".into(),
            ));
        }

        let axis = Axis2::new(center, normal);
        let option1 = edge::circle_segment(&axis, radius, self.current, p2)?;
        let option2 = edge::circle_segment(&axis, radius, p2, self.current)?;
        let arc = if edge::length(&option1) < edge::length(&option2) {
            option1
        } else {
            option2.reversed()
        };

        self.edges.push(arc);
        self.current = p2;
        self.direction = Some(resulting_direction);
        Ok(())
    }

    /// Direction of the last segment, `None` before the first one
    pub fn direction(&self) -> Option<Dir> {
        self.direction
    }

    /// Current end point
    pub fn location(&self) -> DVec3 {
        self.current
    }

    pub fn wire(&self) -> Result<Wire> {
        from_edges(&self.edges)
    }

    /// Sweep `profile` along the wire built so far
    pub fn pipe(&self, kernel: &dyn Kernel, profile: &Shape) -> Result<Shape> {
        pipe::from_spline_and_profile(kernel, &self.wire()?, profile)
    }

    /// Sweep a circle of `radius` centered on the current point, normal to
    /// the current direction (Z before any segment)
    pub fn pipe_with_circular_profile(&self, kernel: &dyn Kernel, radius: f64) -> Result<Shape> {
        let axis = Axis2::new(self.current, self.direction.unwrap_or(Dir::Z));
        let profile = face::from_edge(&edge::full_circle_ax2(&axis, radius)?)?;
        self.pipe(kernel, &profile.into())
    }
}
