//! Boundary representation topology
//!
//! Shapes are cheap-to-clone handles onto immutable, reference counted
//! nodes. Two handles onto the same node are the *same* shape
//! ([`Shape::is_same`]); they are *equal* only if their orientation matches
//! as well.

mod builder;
mod explorer;
mod geometry;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

pub use explorer::{explore, explore_typed};
pub use geometry::{Curve, CurveType, Surface, SurfaceType};

/// Kind of a topological shape, from the most complex to the simplest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeType {
    Compound,
    CompSolid,
    Solid,
    Shell,
    Face,
    Wire,
    Edge,
    Vertex,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeType::Compound => "compound",
            ShapeType::CompSolid => "compsolid",
            ShapeType::Solid => "solid",
            ShapeType::Shell => "shell",
            ShapeType::Face => "face",
            ShapeType::Wire => "wire",
            ShapeType::Edge => "edge",
            ShapeType::Vertex => "vertex",
        };
        f.write_str(name)
    }
}

/// Orientation of a shape relative to its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Forward,
    Reversed,
}

impl Orientation {
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reversed,
            Orientation::Reversed => Orientation::Forward,
        }
    }

    /// Orientation of a child seen through a parent with orientation `self`
    pub fn compose(self, child: Orientation) -> Self {
        match self {
            Orientation::Forward => child,
            Orientation::Reversed => child.reversed(),
        }
    }
}

#[derive(Debug)]
struct Node<T> {
    id: Uuid,
    data: T,
}

#[derive(Debug)]
pub(crate) struct VertexData {
    pub point: DVec3,
}

#[derive(Debug)]
pub(crate) struct EdgeData {
    pub curve: Curve,
    pub first: f64,
    pub last: f64,
    pub start: Vertex,
    pub end: Vertex,
}

#[derive(Debug)]
pub(crate) struct WireData {
    pub edges: Vec<Edge>,
}

#[derive(Debug)]
pub(crate) struct FaceData {
    pub surface: Surface,
    pub wires: Vec<Wire>,
}

#[derive(Debug)]
pub(crate) struct ShellData {
    pub faces: Vec<Face>,
}

#[derive(Debug)]
pub(crate) struct SolidData {
    pub shells: Vec<Shell>,
}

#[derive(Debug)]
pub(crate) struct CompSolidData {
    pub solids: Vec<Solid>,
}

#[derive(Debug)]
pub(crate) struct CompoundData {
    pub children: Vec<Shape>,
}

/// A concrete shape kind (`Vertex`, `Edge`, ...)
pub trait TypedShape: Clone + Into<Shape> + TryFrom<Shape, Error = Error> {
    const KIND: ShapeType;
}

macro_rules! shape_kind {
    ($(#[$meta:meta])* $name:ident, $data:ty, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            node: Arc<Node<$data>>,
            orientation: Orientation,
        }

        impl $name {
            pub(crate) fn from_data(data: $data) -> Self {
                Self {
                    node: Arc::new(Node {
                        id: Uuid::new_v4(),
                        data,
                    }),
                    orientation: Orientation::Forward,
                }
            }

            pub(crate) fn data(&self) -> &$data {
                &self.node.data
            }

            /// Identity of the underlying node
            pub fn id(&self) -> Uuid {
                self.node.id
            }

            pub fn orientation(&self) -> Orientation {
                self.orientation
            }

            /// Same node, given orientation
            pub fn oriented(&self, orientation: Orientation) -> Self {
                Self {
                    node: Arc::clone(&self.node),
                    orientation,
                }
            }

            /// Same node, opposite orientation
            pub fn reversed(&self) -> Self {
                self.oriented(self.orientation.reversed())
            }

            /// Same node regardless of orientation
            pub fn is_same(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.node, &other.node)
            }

            pub fn shape_type(&self) -> ShapeType {
                ShapeType::$kind
            }

            pub fn as_shape(&self) -> Shape {
                Shape::$kind(self.clone())
            }
        }

        impl TypedShape for $name {
            const KIND: ShapeType = ShapeType::$kind;
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.is_same(other) && self.orientation == other.orientation
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.node.id.hash(state);
                self.orientation.hash(state);
            }
        }

        impl From<$name> for Shape {
            fn from(shape: $name) -> Self {
                Shape::$kind(shape)
            }
        }

        impl From<&$name> for Shape {
            fn from(shape: &$name) -> Self {
                Shape::$kind(shape.clone())
            }
        }

        impl TryFrom<Shape> for $name {
            type Error = Error;

            fn try_from(shape: Shape) -> Result<Self, Error> {
                match shape {
                    Shape::$kind(inner) => Ok(inner),
                    other => Err(Error::Topology(format!(
                        "Expected {}, got {}",
                        ShapeType::$kind,
                        other.shape_type()
                    ))),
                }
            }
        }

        impl TryFrom<&Shape> for $name {
            type Error = Error;

            fn try_from(shape: &Shape) -> Result<Self, Error> {
                Self::try_from(shape.clone())
            }
        }
    };
}

shape_kind!(
    /// A point in space
    Vertex, VertexData, Vertex
);
shape_kind!(
    /// A trimmed curve bounded by two vertices
    Edge, EdgeData, Edge
);
shape_kind!(
    /// A connected sequence of edges
    Wire, WireData, Wire
);
shape_kind!(
    /// A bounded portion of a surface; the first wire is the outer boundary
    Face, FaceData, Face
);
shape_kind!(
    /// Faces joined along their edges
    Shell, ShellData, Shell
);
shape_kind!(
    /// A volume bounded by shells
    Solid, SolidData, Solid
);
shape_kind!(
    /// Solids sharing faces
    CompSolid, CompSolidData, CompSolid
);
shape_kind!(
    /// An arbitrary group of shapes
    Compound, CompoundData, Compound
);

/// Any topological shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Compound(Compound),
    CompSolid(CompSolid),
    Solid(Solid),
    Shell(Shell),
    Face(Face),
    Wire(Wire),
    Edge(Edge),
    Vertex(Vertex),
}

macro_rules! dispatch {
    ($shape:expr, $inner:ident => $body:expr) => {
        match $shape {
            Shape::Compound($inner) => $body,
            Shape::CompSolid($inner) => $body,
            Shape::Solid($inner) => $body,
            Shape::Shell($inner) => $body,
            Shape::Face($inner) => $body,
            Shape::Wire($inner) => $body,
            Shape::Edge($inner) => $body,
            Shape::Vertex($inner) => $body,
        }
    };
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        dispatch!(self, s => s.shape_type())
    }

    pub fn id(&self) -> Uuid {
        dispatch!(self, s => s.id())
    }

    pub fn orientation(&self) -> Orientation {
        dispatch!(self, s => s.orientation())
    }

    pub fn oriented(&self, orientation: Orientation) -> Shape {
        dispatch!(self, s => s.oriented(orientation).into())
    }

    pub fn reversed(&self) -> Shape {
        self.oriented(self.orientation().reversed())
    }

    /// Same underlying node regardless of orientation
    pub fn is_same(&self, other: &Shape) -> bool {
        self.id() == other.id()
    }

    /// Direct sub-shapes, oriented relative to this shape
    pub fn children(&self) -> Vec<Shape> {
        let orientation = self.orientation();
        let children: Vec<Shape> = match self {
            Shape::Vertex(_) => Vec::new(),
            Shape::Edge(e) => vec![e.data().start.as_shape(), e.data().end.as_shape()],
            Shape::Wire(w) => w.data().edges.iter().map(Shape::from).collect(),
            Shape::Face(f) => f.data().wires.iter().map(Shape::from).collect(),
            Shape::Shell(s) => s.data().faces.iter().map(Shape::from).collect(),
            Shape::Solid(s) => s.data().shells.iter().map(Shape::from).collect(),
            Shape::CompSolid(c) => c.data().solids.iter().map(Shape::from).collect(),
            Shape::Compound(c) => c.data().children.clone(),
        };
        children
            .into_iter()
            .map(|child| {
                let composed = orientation.compose(child.orientation());
                child.oriented(composed)
            })
            .collect()
    }

    pub fn as_vertex(&self) -> Option<&Vertex> {
        match self {
            Shape::Vertex(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Shape::Edge(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> Option<&Wire> {
        match self {
            Shape::Wire(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_face(&self) -> Option<&Face> {
        match self {
            Shape::Face(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_shell(&self) -> Option<&Shell> {
        match self {
            Shape::Shell(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_solid(&self) -> Option<&Solid> {
        match self {
            Shape::Solid(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Shape::Compound(c) => Some(c),
            _ => None,
        }
    }
}

impl Vertex {
    pub fn point(&self) -> DVec3 {
        self.data().point
    }
}

impl Edge {
    pub fn curve(&self) -> &Curve {
        &self.data().curve
    }

    /// Parameter range of the underlying curve
    pub fn range(&self) -> (f64, f64) {
        (self.data().first, self.data().last)
    }

    /// First vertex along the edge's orientation
    pub fn first_vertex(&self) -> Vertex {
        match self.orientation {
            Orientation::Forward => self.data().start.clone(),
            Orientation::Reversed => self.data().end.clone(),
        }
    }

    /// Last vertex along the edge's orientation
    pub fn last_vertex(&self) -> Vertex {
        match self.orientation {
            Orientation::Forward => self.data().end.clone(),
            Orientation::Reversed => self.data().start.clone(),
        }
    }

    pub fn start_point(&self) -> DVec3 {
        self.first_vertex().point()
    }

    pub fn end_point(&self) -> DVec3 {
        self.last_vertex().point()
    }

    /// Start and end vertex are the same node
    pub fn is_closed(&self) -> bool {
        self.data().start.is_same(&self.data().end)
    }

    /// Point at the middle of the parameter range
    pub fn midpoint(&self) -> DVec3 {
        let (first, last) = self.range();
        self.curve().value(0.5 * (first + last))
    }
}

impl Wire {
    /// Edges oriented as seen from this wire, in traversal order
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .data()
            .edges
            .iter()
            .map(|e| e.oriented(self.orientation.compose(e.orientation())))
            .collect();
        if self.orientation == Orientation::Reversed {
            edges.reverse();
        }
        edges
    }

    /// Vertices in traversal order (the first vertex is repeated at the end
    /// of closed wires)
    pub fn ordered_points(&self) -> Vec<DVec3> {
        let edges = self.edges();
        let mut points: Vec<DVec3> = edges.iter().map(Edge::start_point).collect();
        if let Some(last) = edges.last() {
            points.push(last.end_point());
        }
        points
    }

    pub fn is_closed(&self) -> bool {
        let edges = self.edges();
        match (edges.first(), edges.last()) {
            (Some(first), Some(last)) => first.first_vertex().is_same(&last.last_vertex()),
            _ => false,
        }
    }
}

impl Face {
    pub fn surface(&self) -> &Surface {
        &self.data().surface
    }

    pub fn wires(&self) -> Vec<Wire> {
        self.data()
            .wires
            .iter()
            .map(|w| w.oriented(self.orientation.compose(w.orientation())))
            .collect()
    }

    pub fn outer_wire(&self) -> Option<Wire> {
        self.wires().into_iter().next()
    }
}

impl Shell {
    pub fn faces(&self) -> Vec<Face> {
        self.data()
            .faces
            .iter()
            .map(|f| f.oriented(self.orientation.compose(f.orientation())))
            .collect()
    }
}

impl Solid {
    pub fn shells(&self) -> Vec<Shell> {
        self.data()
            .shells
            .iter()
            .map(|s| s.oriented(self.orientation.compose(s.orientation())))
            .collect()
    }
}

impl CompSolid {
    pub fn solids(&self) -> Vec<Solid> {
        self.data()
            .solids
            .iter()
            .map(|s| s.oriented(self.orientation.compose(s.orientation())))
            .collect()
    }
}

impl Compound {
    pub fn children(&self) -> Vec<Shape> {
        self.as_shape().children()
    }

    pub fn is_empty(&self) -> bool {
        self.data().children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_orientation() {
        let a = Vertex::new(DVec3::ZERO);
        let b = a.reversed();
        assert!(a.is_same(&b));
        assert_ne!(a, b);
        assert_eq!(a, b.reversed());

        let other = Vertex::new(DVec3::ZERO);
        assert!(!a.is_same(&other));
    }

    #[test]
    fn test_try_from() {
        let v = Vertex::new(DVec3::X);
        let shape: Shape = v.clone().into();
        assert_eq!(shape.shape_type(), ShapeType::Vertex);
        assert!(Vertex::try_from(&shape).is_ok());

        let err = Edge::try_from(shape).unwrap_err();
        assert!(matches!(err, Error::Topology(_)));
        assert!(err.to_string().contains("Expected edge, got vertex"));
    }

    #[test]
    fn test_reversed_edge_swaps_vertices() {
        let a = Vertex::new(DVec3::ZERO);
        let b = Vertex::new(DVec3::X);
        let edge = Edge::line(&a, &b).unwrap();
        assert_eq!(edge.start_point(), DVec3::ZERO);

        let reversed = edge.reversed();
        assert_eq!(reversed.start_point(), DVec3::X);
        assert_eq!(reversed.end_point(), DVec3::ZERO);
    }

    #[test]
    fn test_children_compose_orientation() {
        let a = Vertex::new(DVec3::ZERO);
        let b = Vertex::new(DVec3::X);
        let edge = Edge::line(&a, &b).unwrap();
        let wire = Wire::new(vec![edge.clone()]);

        let children = wire.reversed().as_shape().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].orientation(), Orientation::Reversed);
        assert!(children[0].is_same(&edge.as_shape()));
    }

    #[test]
    fn test_reversed_wire_traversal() {
        let a = Vertex::new(DVec3::ZERO);
        let b = Vertex::new(DVec3::X);
        let c = Vertex::new(DVec3::Y);
        let wire = Wire::new(vec![Edge::line(&a, &b).unwrap(), Edge::line(&b, &c).unwrap()]);

        let points = wire.reversed().ordered_points();
        assert_eq!(points, vec![DVec3::Y, DVec3::X, DVec3::ZERO]);
    }

    #[test]
    fn test_reversed_compsolid_reverses_solids() {
        use crate::primitive::{PositionCentering, make_cube};
        let solid = make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO).unwrap();
        let compsolid = CompSolid::new(vec![solid.clone()]);
        assert_eq!(compsolid.solids()[0].orientation(), Orientation::Forward);

        let reversed = compsolid.reversed().solids();
        assert_eq!(reversed[0].orientation(), Orientation::Reversed);
        assert!(reversed[0].is_same(&solid));
    }

    #[test]
    fn test_shape_type_order() {
        assert!(ShapeType::Compound < ShapeType::Solid);
        assert!(ShapeType::Edge < ShapeType::Vertex);
    }
}
