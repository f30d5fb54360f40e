//! Decomposing shapes into their sub-shapes
//!
//! Sub-shapes are unique (a vertex shared by three edges is reported once)
//! and come in depth-first order.

use glam::DVec3;

use crate::compound;
use crate::error::{Error, Result};
use crate::topology::{
    Edge, Face, Shape, ShapeType, Shell, Solid, TypedShape, Vertex, Wire, explore, explore_typed,
};

/// Number of unique sub-shapes of the given type
pub fn count_x(shape: &Shape, shape_type: ShapeType) -> usize {
    explore(shape, shape_type).len()
}

/// Number of unique sub-shapes of the given type over all `shapes`
pub fn count_x_in(shapes: &[Shape], shape_type: ShapeType) -> usize {
    explore(&group(shapes), shape_type).len()
}

pub fn count_solids(shape: &Shape) -> usize {
    count_x(shape, ShapeType::Solid)
}

fn group(shapes: &[Shape]) -> Shape {
    compound::from(shapes.iter().cloned()).into()
}

fn all_within<T: TypedShape>(shape: &Shape) -> Vec<T> {
    explore_typed(shape)
}

fn all_within_all<T: TypedShape>(shapes: &[Shape]) -> Vec<T> {
    explore_typed(&group(shapes))
}

pub fn all_solids_within(shape: &Shape) -> Vec<Solid> {
    all_within(shape)
}

pub fn all_solids_within_all(shapes: &[Shape]) -> Vec<Solid> {
    all_within_all(shapes)
}

pub fn all_shells_within(shape: &Shape) -> Vec<Shell> {
    all_within(shape)
}

pub fn all_shells_within_all(shapes: &[Shape]) -> Vec<Shell> {
    all_within_all(shapes)
}

pub fn all_faces_within(shape: &Shape) -> Vec<Face> {
    all_within(shape)
}

pub fn all_faces_within_all(shapes: &[Shape]) -> Vec<Face> {
    all_within_all(shapes)
}

pub fn all_edges_within(shape: &Shape) -> Vec<Edge> {
    all_within(shape)
}

pub fn all_edges_within_all(shapes: &[Shape]) -> Vec<Edge> {
    all_within_all(shapes)
}

pub fn all_edges_within_wires(wires: &[Wire]) -> Vec<Edge> {
    explore_typed(&Shape::from(compound::from(wires.iter())))
}

pub fn all_wires_within(shape: &Shape) -> Vec<Wire> {
    all_within(shape)
}

pub fn all_wires_within_all(shapes: &[Shape]) -> Vec<Wire> {
    all_within_all(shapes)
}

pub fn all_vertices_within(shape: &Shape) -> Vec<Vertex> {
    all_within(shape)
}

pub fn all_vertices_within_all(shapes: &[Shape]) -> Vec<Vertex> {
    all_within_all(shapes)
}

pub fn all_vertex_coordinates_within(shape: &Shape) -> Vec<DVec3> {
    all_vertices_within(shape).iter().map(Vertex::point).collect()
}

pub fn all_vertex_coordinates_within_all(shapes: &[Shape]) -> Vec<DVec3> {
    all_vertices_within_all(shapes)
        .iter()
        .map(Vertex::point)
        .collect()
}

fn try_get_single<T: TypedShape>(shape: &Shape, first_of_multiple_ok: bool) -> Option<T> {
    let mut found: Vec<T> = explore_typed(shape);
    match found.len() {
        0 => None,
        1 => found.pop(),
        _ if first_of_multiple_ok => Some(found.swap_remove(0)),
        _ => None,
    }
}

fn get_single<T: TypedShape>(shape: &Shape, first_of_multiple_ok: bool) -> Result<T> {
    let count = count_x(shape, T::KIND);
    try_get_single(shape, first_of_multiple_ok).ok_or_else(|| {
        Error::Topology(format!(
            "Expected a single {} but found {}",
            T::KIND,
            count
        ))
    })
}

/// The only solid within `shape`
///
/// `None` if there is none, or if there are several and
/// `first_of_multiple_ok` is false.
pub fn try_get_single_solid(shape: &Shape, first_of_multiple_ok: bool) -> Option<Solid> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn try_get_single_shell(shape: &Shape, first_of_multiple_ok: bool) -> Option<Shell> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn try_get_single_face(shape: &Shape, first_of_multiple_ok: bool) -> Option<Face> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn try_get_single_edge(shape: &Shape, first_of_multiple_ok: bool) -> Option<Edge> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn try_get_single_wire(shape: &Shape, first_of_multiple_ok: bool) -> Option<Wire> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn try_get_single_vertex(shape: &Shape, first_of_multiple_ok: bool) -> Option<Vertex> {
    try_get_single(shape, first_of_multiple_ok)
}

pub fn get_single_solid(shape: &Shape, first_of_multiple_ok: bool) -> Result<Solid> {
    get_single(shape, first_of_multiple_ok)
}

pub fn get_single_shell(shape: &Shape, first_of_multiple_ok: bool) -> Result<Shell> {
    get_single(shape, first_of_multiple_ok)
}

pub fn get_single_face(shape: &Shape, first_of_multiple_ok: bool) -> Result<Face> {
    get_single(shape, first_of_multiple_ok)
}

pub fn get_single_edge(shape: &Shape, first_of_multiple_ok: bool) -> Result<Edge> {
    get_single(shape, first_of_multiple_ok)
}

pub fn get_single_wire(shape: &Shape, first_of_multiple_ok: bool) -> Result<Wire> {
    get_single(shape, first_of_multiple_ok)
}

pub fn get_single_vertex(shape: &Shape, first_of_multiple_ok: bool) -> Result<Vertex> {
    get_single(shape, first_of_multiple_ok)
}
