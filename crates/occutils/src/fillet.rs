//! Edge fillets

use crate::error::{Error, Result};
use crate::kernel::Kernel;
use crate::topology::{Edge, Shape, explore_typed};

/// Fillet every edge of `shape` with the same radius
pub fn fillet_all(kernel: &dyn Kernel, shape: &Shape, radius: f64) -> Result<Shape> {
    fillet_adaptive_radius(kernel, shape, |_| radius)
}

/// Fillet each edge with the radius returned by `radius_by_edge`
///
/// Returning `f64::NAN` leaves that edge untouched. If no edge is selected
/// the shape is returned unchanged without calling the kernel.
pub fn fillet_adaptive_radius<F>(
    kernel: &dyn Kernel,
    shape: &Shape,
    radius_by_edge: F,
) -> Result<Shape>
where
    F: Fn(&Edge) -> f64,
{
    let mut selection = Vec::new();
    for edge in explore_typed::<Edge>(shape) {
        let radius = radius_by_edge(&edge);
        if radius.is_nan() {
            continue;
        }
        if radius <= 0.0 || radius.is_infinite() {
            return Err(Error::InvalidArgument(format!(
                "Fillet radius must be positive, got {}",
                radius
            )));
        }
        selection.push((edge, radius));
    }

    if selection.is_empty() {
        tracing::debug!("No edges selected for fillet");
        return Ok(shape.clone());
    }

    tracing::debug!(
        "Filleting {} edges with kernel {}",
        selection.len(),
        kernel.name()
    );
    kernel.fillet(shape, &selection).map_err(|e| {
        tracing::warn!("Fillet failed: {}", e);
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve;
    use crate::kernel::mock::{Call, MockKernel};
    use crate::primitive::{self, PositionCentering};
    use glam::DVec3;

    fn unit_box() -> Shape {
        primitive::make_box(1.0, 2.0, 3.0, PositionCentering::DoNotCenter, DVec3::ZERO)
            .unwrap()
            .as_shape()
    }

    #[test]
    fn test_fillet_all_selects_every_edge() {
        let kernel = MockKernel::new();
        fillet_all(&kernel, &unit_box(), 0.1).unwrap();
        assert_eq!(kernel.calls(), vec![Call::Fillet(vec![0.1; 12])]);
    }

    #[test]
    fn test_nan_skips_edges() {
        let kernel = MockKernel::new();
        // Only the edges of length 3 (along Z)
        fillet_adaptive_radius(&kernel, &unit_box(), |edge| {
            if (curve::length(&curve::from_edge(edge)) - 3.0).abs() < 1e-9 {
                0.2
            } else {
                f64::NAN
            }
        })
        .unwrap();
        assert_eq!(kernel.calls(), vec![Call::Fillet(vec![0.2; 4])]);
    }

    #[test]
    fn test_no_selection_returns_shape() {
        let kernel = MockKernel::new();
        let shape = unit_box();
        let result = fillet_adaptive_radius(&kernel, &shape, |_| f64::NAN).unwrap();
        assert_eq!(result, shape);
        assert!(kernel.calls().is_empty());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let kernel = MockKernel::new();
        let err = fillet_all(&kernel, &unit_box(), -1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
