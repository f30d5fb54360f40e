//! Single-shape STEP export

use std::path::Path;

use crate::error::Result;
use crate::io::StepUnit;
use crate::kernel::{Kernel, StepModelType, StepWriteOptions};
use crate::topology::Shape;

/// Write `shape` to `path` in `unit`, with non-manifold topology enabled
pub fn export_step(
    kernel: &dyn Kernel,
    shape: &Shape,
    path: impl AsRef<Path>,
    unit: StepUnit,
) -> Result<()> {
    let path = path.as_ref();
    let options = StepWriteOptions {
        unit,
        model_type: StepModelType::AsIs,
        non_manifold: true,
        ..StepWriteOptions::default()
    };
    tracing::debug!(
        "Exporting {} to {} ({})",
        shape.shape_type(),
        path.display(),
        unit
    );
    kernel.write_step(shape, path, &options).map_err(|e| {
        tracing::warn!("STEP export to {} failed: {}", path.display(), e);
        e.into()
    })
}
