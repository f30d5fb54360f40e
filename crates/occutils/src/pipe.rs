//! Pipe sweeps

use crate::error::Result;
use crate::kernel::Kernel;
use crate::topology::{Shape, Wire};

/// Sweep `profile` along the spine `wire`
pub fn from_spline_and_profile(kernel: &dyn Kernel, wire: &Wire, profile: &Shape) -> Result<Shape> {
    tracing::debug!(
        "Sweeping {} along a wire of {} edges with kernel {}",
        profile.shape_type(),
        wire.edges().len(),
        kernel.name()
    );
    kernel.pipe(wire, profile).map_err(|e| {
        tracing::warn!("Pipe sweep failed: {}", e);
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge;
    use crate::kernel::mock::{Call, MockKernel};
    use crate::kernel::{KernelError, NullKernel};
    use crate::wire;
    use glam::DVec3;

    #[test]
    fn test_pipe_delegates() {
        let kernel = MockKernel::new();
        let spine = wire::from_points(&[DVec3::ZERO, DVec3::Z * 5.0], false).unwrap();
        let profile = edge::full_circle(1.0).unwrap().as_shape();
        from_spline_and_profile(&kernel, &spine, &profile).unwrap();
        assert_eq!(kernel.calls(), vec![Call::Pipe]);
    }

    #[test]
    fn test_pipe_without_kernel() {
        let spine = wire::from_points(&[DVec3::ZERO, DVec3::X], false).unwrap();
        let profile = edge::full_circle(1.0).unwrap().as_shape();
        let err = from_spline_and_profile(&NullKernel, &spine, &profile).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Kernel(KernelError::KernelNotAvailable(_))
        ));
    }
}
