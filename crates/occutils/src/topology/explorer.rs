//! Sub-shape traversal

use std::collections::HashSet;

use uuid::Uuid;

use super::{Shape, ShapeType, TypedShape};

/// Unique sub-shapes of type `shape_type` in depth-first order
///
/// A shape of the requested type yields itself. Sub-shapes reached more
/// than once (shared edges, shared vertices) are reported once, with the
/// orientation of their first occurrence.
pub fn explore(shape: &Shape, shape_type: ShapeType) -> Vec<Shape> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    visit(shape, shape_type, &mut seen, &mut found);
    found
}

/// [`explore`] for a typed shape kind
pub fn explore_typed<T: TypedShape>(shape: &Shape) -> Vec<T> {
    explore(shape, T::KIND)
        .into_iter()
        .filter_map(|s| T::try_from(s).ok())
        .collect()
}

fn visit(shape: &Shape, shape_type: ShapeType, seen: &mut HashSet<Uuid>, found: &mut Vec<Shape>) {
    let current = shape.shape_type();
    if current == shape_type {
        if seen.insert(shape.id()) {
            found.push(shape.clone());
        }
        return;
    }
    // Only compounds may hold shapes of any type
    if current > shape_type && current != ShapeType::Compound {
        return;
    }
    for child in shape.children() {
        visit(&child, shape_type, seen, found);
    }
}
