//! Kernel trait definitions
//!
//! Everything that needs a real geometry kernel (boolean solids, fillets,
//! pipe sweeps, mass properties, STEP/IGES transfer) goes through the
//! [`Kernel`] trait. The utilities in this crate only normalise input and
//! guard against degenerate arguments before delegating.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io::{FileFormat, StepUnit};
use crate::topology::{Edge, Shape, Wire};
use crate::xde::Doc;

/// Error type for kernel operations
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Unsupported by kernel: {0}")]
    Unsupported(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("File I/O error: {0}")]
    FileIo(String),
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

/// Boolean operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    /// Union of arguments and tools
    Fuse,
    /// Arguments minus tools
    Cut,
    /// Intersection of arguments and tools
    Common,
    /// Intersection curves / points between arguments and tools
    Section,
}

/// Outcome of reading an exchange file
#[derive(Debug, Clone, Default)]
pub struct TransferResult {
    /// Number of transferable roots found in the file
    pub roots: usize,
    /// Shapes obtained by transferring the roots
    pub shapes: Vec<Shape>,
}

/// STEP representation written for each shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepModelType {
    /// Pick the representation from the shape type
    #[default]
    AsIs,
    ManifoldSolidBrep,
    FacetedBrep,
    ShellBasedSurfaceModel,
    GeometricCurveSet,
}

/// Options for STEP export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepWriteOptions {
    /// Length unit of the written file
    pub unit: StepUnit,
    pub model_type: StepModelType,
    /// Write non-manifold topology
    pub non_manifold: bool,
    /// Header author
    pub author: String,
    /// Header organization
    pub organization: String,
    /// Header originating system
    pub originating_system: String,
}

impl Default for StepWriteOptions {
    fn default() -> Self {
        Self {
            unit: StepUnit::Mm,
            model_type: StepModelType::AsIs,
            non_manifold: true,
            author: "occutils".into(),
            organization: "occutils".into(),
            originating_system: "occutils".into(),
        }
    }
}

/// The geometry kernel the utilities delegate to
///
/// Implementations of this trait provide the actual geometry operations
/// using different backends.
pub trait Kernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Perform a boolean operation between argument and tool shapes
    ///
    /// Both lists are non-empty when called from [`crate::boolean`].
    fn boolean(&self, op: BooleanOp, arguments: &[Shape], tools: &[Shape])
    -> KernelResult<Shape>;

    /// Round the given edges of `shape`, each with its own radius
    fn fillet(&self, shape: &Shape, edges: &[(Edge, f64)]) -> KernelResult<Shape>;

    /// Sweep `profile` along `spine`
    fn pipe(&self, spine: &Wire, profile: &Shape) -> KernelResult<Shape>;

    /// Volume of a solid shape
    fn volume(&self, shape: &Shape) -> KernelResult<f64>;

    /// Read a STEP or IGES file and transfer all roots
    fn read(&self, path: &Path, format: FileFormat) -> KernelResult<TransferResult>;

    /// Write a single shape to a STEP file
    fn write_step(&self, shape: &Shape, path: &Path, options: &StepWriteOptions)
    -> KernelResult<()>;

    /// Read a STEP file including names, colors and assembly structure
    fn read_step_document(&self, path: &Path, doc: &mut Doc) -> KernelResult<()>;

    /// Write a document including names, colors and assembly structure
    fn write_step_document(
        &self,
        doc: &Doc,
        path: &Path,
        options: &StepWriteOptions,
    ) -> KernelResult<()>;
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl Kernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn boolean(
        &self,
        _op: BooleanOp,
        _arguments: &[Shape],
        _tools: &[Shape],
    ) -> KernelResult<Shape> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn fillet(&self, _shape: &Shape, _edges: &[(Edge, f64)]) -> KernelResult<Shape> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn pipe(&self, _spine: &Wire, _profile: &Shape) -> KernelResult<Shape> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn volume(&self, _shape: &Shape) -> KernelResult<f64> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn read(&self, _path: &Path, _format: FileFormat) -> KernelResult<TransferResult> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available for file import".into(),
        ))
    }

    fn write_step(
        &self,
        _shape: &Shape,
        _path: &Path,
        _options: &StepWriteOptions,
    ) -> KernelResult<()> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available for STEP export".into(),
        ))
    }

    fn read_step_document(&self, _path: &Path, _doc: &mut Doc) -> KernelResult<()> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available for STEP import".into(),
        ))
    }

    fn write_step_document(
        &self,
        _doc: &Doc,
        _path: &Path,
        _options: &StepWriteOptions,
    ) -> KernelResult<()> {
        Err(KernelError::KernelNotAvailable(
            "No CAD kernel available for STEP export".into(),
        ))
    }
}

/// Get the default kernel based on available features
pub fn default_kernel() -> Box<dyn Kernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Vertex;
    use glam::DVec3;

    #[test]
    fn test_null_kernel() {
        let kernel = NullKernel;
        assert_eq!(kernel.name(), "null");
        assert!(!kernel.is_available());

        let shape = Vertex::new(DVec3::ZERO).as_shape();
        let result = kernel.volume(&shape);
        assert!(matches!(result, Err(KernelError::KernelNotAvailable(_))));

        let result = kernel.read(Path::new("part.step"), FileFormat::Step);
        assert!(matches!(result, Err(KernelError::KernelNotAvailable(_))));
    }

    #[test]
    fn test_default_write_options() {
        let options = StepWriteOptions::default();
        assert_eq!(options.unit, StepUnit::Mm);
        assert_eq!(options.model_type, StepModelType::AsIs);
        assert!(options.non_manifold);
        assert_eq!(options.originating_system, "occutils");
    }

    #[cfg(not(feature = "truck"))]
    #[test]
    fn test_default_kernel_is_null() {
        let kernel = default_kernel();
        assert_eq!(kernel.name(), "null");
    }

    #[cfg(feature = "truck")]
    #[test]
    fn test_default_kernel_is_truck() {
        let kernel = default_kernel();
        assert_eq!(kernel.name(), "truck");
        assert!(kernel.is_available());
    }
}
