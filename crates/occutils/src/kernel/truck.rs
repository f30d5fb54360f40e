//! Truck CAD Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library.
//!
//! Note: Only polyhedral solids (planar faces bounded by straight edges) are
//! converted to Truck topology, so booleans work on boxes and other
//! faceted shapes. Fillets, sweeps and exchange files are left to other
//! backends.

use std::collections::HashMap;
use std::path::Path;

use glam::DVec3;
use uuid::Uuid;

use truck_modeling::{
    Curve as TruckCurve, Edge as TruckEdge, Face as TruckFace, Point3, Shell as TruckShell,
    Solid as TruckSolid, Vertex as TruckVertex, Wire as TruckWire, builder,
};
use truck_topology::{EdgeID, VertexID};

use super::{BooleanOp, Kernel, KernelError, KernelResult, StepWriteOptions, TransferResult};
use crate::config::{BOOLEAN_TOLERANCE, Settings};
use crate::geom::{Dir, Plane};
use crate::io::FileFormat;
use crate::topology::{
    Curve, Edge, Face, Orientation, Shape, Shell, Solid, Surface, Vertex, Wire,
    explore_typed,
};
use crate::xde::Doc;

/// Truck-based CAD kernel
#[derive(Debug, Clone)]
pub struct TruckKernel {
    /// Tolerance handed to the boolean operations
    tolerance: f64,
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self::with_tolerance(BOOLEAN_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Kernel using the boolean tolerance from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_tolerance(settings.boolean_tolerance)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Union of all solids in `shapes`
    fn merged(&self, shapes: &[Shape]) -> KernelResult<TruckSolid> {
        let mut solids = Vec::new();
        for shape in shapes {
            for solid in explore_typed::<Solid>(shape) {
                solids.push(ToTruck::default().solid(&solid)?);
            }
        }
        let mut solids = solids.into_iter();
        let first = solids.next().ok_or_else(|| {
            KernelError::OperationFailed("Boolean operand contains no solid".into())
        })?;
        solids.try_fold(first, |acc, solid| {
            truck_shapeops::or(&acc, &solid, self.tolerance)
                .ok_or_else(|| KernelError::OperationFailed("Fuse of operands failed".into()))
        })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn boolean(&self, op: BooleanOp, arguments: &[Shape], tools: &[Shape]) -> KernelResult<Shape> {
        let arguments = self.merged(arguments)?;
        let mut tools = self.merged(tools)?;

        let result = match op {
            BooleanOp::Fuse => truck_shapeops::or(&arguments, &tools, self.tolerance),
            BooleanOp::Common => truck_shapeops::and(&arguments, &tools, self.tolerance),
            BooleanOp::Cut => {
                tools.not();
                truck_shapeops::and(&arguments, &tools, self.tolerance)
            }
            BooleanOp::Section => {
                return Err(KernelError::Unsupported(
                    "Section is not supported in Truck kernel".into(),
                ));
            }
        }
        .ok_or_else(|| KernelError::OperationFailed(format!("Truck {:?} failed", op)))?;

        let solid = FromTruck::default().solid(&result)?;
        tracing::debug!("Truck {:?} produced {} shell(s)", op, solid.shells().len());
        Ok(solid.as_shape())
    }

    fn fillet(&self, _shape: &Shape, _edges: &[(Edge, f64)]) -> KernelResult<Shape> {
        Err(KernelError::Unsupported(
            "Fillet is not supported in Truck kernel".into(),
        ))
    }

    fn pipe(&self, _spine: &Wire, _profile: &Shape) -> KernelResult<Shape> {
        Err(KernelError::Unsupported(
            "Pipe sweep is not supported in Truck kernel".into(),
        ))
    }

    fn volume(&self, shape: &Shape) -> KernelResult<f64> {
        let mut volume = 0.0;
        for solid in explore_typed::<Solid>(shape) {
            for shell in solid.shells() {
                for face in shell.faces() {
                    volume += face_volume_term(&face)?;
                }
            }
        }
        Ok(volume)
    }

    fn read(&self, _path: &Path, _format: FileFormat) -> KernelResult<TransferResult> {
        Err(KernelError::Unsupported(
            "File import is not supported in Truck kernel".into(),
        ))
    }

    fn write_step(
        &self,
        _shape: &Shape,
        _path: &Path,
        _options: &StepWriteOptions,
    ) -> KernelResult<()> {
        Err(KernelError::Unsupported(
            "STEP export is not supported in Truck kernel".into(),
        ))
    }

    fn read_step_document(&self, _path: &Path, _doc: &mut Doc) -> KernelResult<()> {
        Err(KernelError::Unsupported(
            "STEP import is not supported in Truck kernel".into(),
        ))
    }

    fn write_step_document(
        &self,
        _doc: &Doc,
        _path: &Path,
        _options: &StepWriteOptions,
    ) -> KernelResult<()> {
        Err(KernelError::Unsupported(
            "STEP export is not supported in Truck kernel".into(),
        ))
    }
}

// ============== Volume ==============

/// Divergence theorem contribution of a planar face (fan over each loop)
fn face_volume_term(face: &Face) -> KernelResult<f64> {
    if !matches!(face.surface(), Surface::Plane(_)) {
        return Err(KernelError::Unsupported(
            "Truck kernel computes volumes of polyhedral solids only".into(),
        ));
    }
    let mut term = 0.0;
    for wire in face.wires() {
        let points = wire.ordered_points();
        let Some(&origin) = points.first() else {
            continue;
        };
        for pair in points.windows(2) {
            term += origin.dot(pair[0].cross(pair[1]));
        }
    }
    Ok(term / 6.0)
}

// ============== Conversion ==============

fn to_point3(p: DVec3) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

fn to_dvec3(p: Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

/// Native topology to Truck, sharing vertices and edges by id
#[derive(Default)]
struct ToTruck {
    vertices: HashMap<Uuid, TruckVertex>,
    edges: HashMap<Uuid, TruckEdge>,
}

impl ToTruck {
    fn vertex(&mut self, vertex: &Vertex) -> TruckVertex {
        self.vertices
            .entry(vertex.id())
            .or_insert_with(|| builder::vertex(to_point3(vertex.point())))
            .clone()
    }

    fn edge(&mut self, edge: &Edge) -> KernelResult<TruckEdge> {
        if !matches!(edge.curve(), Curve::Line { .. }) {
            return Err(KernelError::Unsupported(
                "Truck kernel converts straight edges only".into(),
            ));
        }
        let absolute = match self.edges.get(&edge.id()) {
            Some(e) => e.clone(),
            None => {
                let forward = edge.oriented(Orientation::Forward);
                let start = self.vertex(&forward.first_vertex());
                let end = self.vertex(&forward.last_vertex());
                let e = builder::line(&start, &end);
                self.edges.insert(edge.id(), e.clone());
                e
            }
        };
        Ok(match edge.orientation() {
            Orientation::Forward => absolute,
            Orientation::Reversed => absolute.inverse(),
        })
    }

    fn face(&mut self, face: &Face) -> KernelResult<TruckFace> {
        if !matches!(face.surface(), Surface::Plane(_)) {
            return Err(KernelError::Unsupported(
                "Truck kernel converts planar faces only".into(),
            ));
        }
        let mut wires = Vec::new();
        for wire in face.wires() {
            let mut edges = Vec::new();
            for edge in wire.edges() {
                edges.push(self.edge(&edge)?);
            }
            wires.push(TruckWire::from(edges));
        }
        builder::try_attach_plane(&wires)
            .map_err(|e| KernelError::OperationFailed(format!("Failed to create face: {:?}", e)))
    }

    fn solid(&mut self, solid: &Solid) -> KernelResult<TruckSolid> {
        let mut shells = Vec::new();
        for shell in solid.shells() {
            let mut faces = Vec::new();
            for face in shell.faces() {
                faces.push(self.face(&face)?);
            }
            shells.push(TruckShell::from(faces));
        }
        // Rejects open or inconsistently oriented shells
        TruckSolid::try_new(shells)
            .map_err(|e| KernelError::OperationFailed(format!("Failed to create solid: {:?}", e)))
    }
}

/// Truck topology back to native, sharing vertices and edges by id
#[derive(Default)]
struct FromTruck {
    vertices: HashMap<VertexID<Point3>, Vertex>,
    edges: HashMap<EdgeID<TruckCurve>, Edge>,
}

impl FromTruck {
    fn vertex(&mut self, vertex: &TruckVertex) -> Vertex {
        self.vertices
            .entry(vertex.id())
            .or_insert_with(|| Vertex::new(to_dvec3(vertex.point())))
            .clone()
    }

    fn edge(&mut self, edge: &TruckEdge) -> KernelResult<Edge> {
        let absolute = match self.edges.get(&edge.id()) {
            Some(e) => e.clone(),
            None => {
                let start = self.vertex(edge.absolute_front());
                let end = self.vertex(edge.absolute_back());
                let e = Edge::line(&start, &end)
                    .map_err(|e| KernelError::OperationFailed(e.to_string()))?;
                self.edges.insert(edge.id(), e.clone());
                e
            }
        };
        Ok(if edge.orientation() {
            absolute
        } else {
            absolute.reversed()
        })
    }

    fn face(&mut self, face: &TruckFace) -> KernelResult<Face> {
        let mut wires = Vec::new();
        for boundary in face.boundaries() {
            let mut edges = Vec::new();
            for edge in boundary.edge_iter() {
                edges.push(self.edge(edge)?);
            }
            wires.push(Wire::new(edges));
        }
        let outer = wires.first().map(Wire::ordered_points).unwrap_or_default();
        let plane = newell_plane(&outer).ok_or_else(|| {
            KernelError::OperationFailed("Degenerate face in boolean result".into())
        })?;
        Ok(Face::new(Surface::Plane(plane), wires))
    }

    fn solid(&mut self, solid: &TruckSolid) -> KernelResult<Solid> {
        let mut shells = Vec::new();
        for shell in solid.boundaries() {
            let mut faces = Vec::new();
            for face in shell.face_iter() {
                faces.push(self.face(face)?);
            }
            shells.push(Shell::new(faces));
        }
        Ok(Solid::new(shells))
    }
}

/// Plane through a closed polygon, normal following its winding
fn newell_plane(points: &[DVec3]) -> Option<Plane> {
    let origin = *points.first()?;
    let normal = points
        .windows(2)
        .fold(DVec3::ZERO, |acc, pair| acc + (pair[0] - origin).cross(pair[1] - origin));
    Some(Plane::new(origin, Dir::new(normal)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{self, PositionCentering};
    use approx::assert_relative_eq;

    fn cube(corner: DVec3) -> Shape {
        primitive::make_cube(1.0, PositionCentering::DoNotCenter, corner)
            .unwrap()
            .as_shape()
    }

    #[test]
    fn test_polyhedral_volume() {
        let kernel = TruckKernel::new();
        let shape = primitive::make_box(2.0, 3.0, 4.0, PositionCentering::CenterX, DVec3::ZERO)
            .unwrap()
            .as_shape();
        assert_relative_eq!(kernel.volume(&shape).unwrap(), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_curved_volume_unsupported() {
        let kernel = TruckKernel::new();
        let cylinder = primitive::make_cylinder(
            1.0,
            2.0,
            primitive::Orientation::Z,
            PositionCentering::DoNotCenter,
            DVec3::ZERO,
        )
        .unwrap()
        .as_shape();
        assert!(matches!(
            kernel.volume(&cylinder),
            Err(KernelError::Unsupported(_))
        ));
    }

    #[test]
    fn test_conversion_shares_topology() {
        let solid = primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO).unwrap();
        let truck = ToTruck::default().solid(&solid).unwrap();
        assert_eq!(truck.boundaries()[0].len(), 6);

        let back = FromTruck::default().solid(&truck).unwrap().as_shape();
        assert_eq!(explore_typed::<Vertex>(&back).len(), 8);
        assert_eq!(explore_typed::<Edge>(&back).len(), 12);
        assert_relative_eq!(TruckKernel::new().volume(&back).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_common_of_overlapping_cubes() {
        let kernel = TruckKernel::new();
        let a = cube(DVec3::ZERO);
        let b = cube(DVec3::splat(0.5));
        let common = kernel.boolean(BooleanOp::Common, &[a], &[b]).unwrap();
        assert_relative_eq!(kernel.volume(&common).unwrap(), 0.125, epsilon = 1e-3);
    }

    #[test]
    fn test_tolerance_from_settings() {
        let mut settings = Settings::default();
        assert_eq!(TruckKernel::from_settings(&settings).tolerance(), BOOLEAN_TOLERANCE);
        settings.boolean_tolerance = 0.01;
        assert_eq!(TruckKernel::from_settings(&settings).tolerance(), 0.01);
    }

    #[test]
    fn test_section_unsupported() {
        let kernel = TruckKernel::new();
        let result = kernel.boolean(
            BooleanOp::Section,
            &[cube(DVec3::ZERO)],
            &[cube(DVec3::X)],
        );
        assert!(matches!(result, Err(KernelError::Unsupported(_))));
    }
}
