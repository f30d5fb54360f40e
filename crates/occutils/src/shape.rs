//! Shape type predicates and properties

use crate::error::Result;
use crate::kernel::Kernel;
use crate::topology::{Shape, ShapeType};

pub fn is_compound(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Compound
}

pub fn is_compound_solid(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::CompSolid
}

pub fn is_solid(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Solid
}

pub fn is_shell(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Shell
}

pub fn is_face(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Face
}

pub fn is_wire(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Wire
}

pub fn is_edge(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Edge
}

pub fn is_vertex(shape: &Shape) -> bool {
    shape.shape_type() == ShapeType::Vertex
}

/// Volume of `shape` as computed by the kernel
pub fn volume(kernel: &dyn Kernel, shape: &Shape) -> Result<f64> {
    tracing::debug!("Computing volume with kernel {}", kernel.name());
    kernel.volume(shape).map_err(|e| {
        tracing::warn!("Volume computation failed: {}", e);
        e.into()
    })
}

/// Conversions from typed shape lists
pub mod shapes {
    use crate::topology::{Face, Shape, Solid};

    pub fn from_solids(solids: &[Solid]) -> Vec<Shape> {
        solids.iter().map(Shape::from).collect()
    }

    pub fn from_faces(faces: &[Face]) -> Vec<Shape> {
        faces.iter().map(Shape::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{KernelError, NullKernel};
    use crate::primitive::{self, PositionCentering};
    use crate::topology::Vertex;
    use glam::DVec3;

    #[test]
    fn test_predicates() {
        let solid = primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO)
            .unwrap()
            .as_shape();
        assert!(is_solid(&solid));
        assert!(!is_shell(&solid));

        let vertex = Vertex::new(DVec3::ZERO).as_shape();
        assert!(is_vertex(&vertex));
        assert!(!is_edge(&vertex));
        assert!(!is_compound(&vertex));
    }

    #[test]
    fn test_from_solids() {
        let a = primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO).unwrap();
        let b = primitive::make_cube(2.0, PositionCentering::DoNotCenter, DVec3::ZERO).unwrap();
        let list = shapes::from_solids(&[a.clone(), b]);
        assert_eq!(list.len(), 2);
        assert!(list[0].is_same(&a.as_shape()));
    }

    #[test]
    fn test_volume_without_kernel() {
        let shape = Vertex::new(DVec3::ZERO).as_shape();
        let err = volume(&NullKernel, &shape).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Kernel(KernelError::KernelNotAvailable(_))
        ));
    }
}
