//! Recording kernel for unit tests

use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec3;
use parking_lot::Mutex;

use super::{BooleanOp, Kernel, KernelError, KernelResult, StepWriteOptions, TransferResult};
use crate::io::FileFormat;
use crate::primitive::{self, PositionCentering};
use crate::topology::{Compound, Edge, Shape, Wire};
use crate::xde::Doc;

/// A kernel call as seen by [`MockKernel`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Boolean {
        op: BooleanOp,
        arguments: usize,
        tools: usize,
    },
    Fillet(Vec<f64>),
    Pipe,
    Volume,
    Read(PathBuf, FileFormat),
    WriteStep(PathBuf, StepWriteOptions),
    ReadStepDocument(PathBuf),
    WriteStepDocument(PathBuf, StepWriteOptions),
}

/// Records every call and answers with cheap stand-in results
#[derive(Debug, Default)]
pub(crate) struct MockKernel {
    calls: Mutex<Vec<Call>>,
    read_result: Option<TransferResult>,
}

impl MockKernel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_read_result(result: TransferResult) -> Self {
        Self {
            calls: Mutex::default(),
            read_result: Some(result),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

impl Kernel for MockKernel {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn boolean(&self, op: BooleanOp, arguments: &[Shape], tools: &[Shape]) -> KernelResult<Shape> {
        self.record(Call::Boolean {
            op,
            arguments: arguments.len(),
            tools: tools.len(),
        });
        let children = arguments.iter().chain(tools).cloned().collect();
        Ok(Compound::new(children).as_shape())
    }

    fn fillet(&self, shape: &Shape, edges: &[(Edge, f64)]) -> KernelResult<Shape> {
        self.record(Call::Fillet(edges.iter().map(|(_, r)| *r).collect()));
        Ok(shape.clone())
    }

    fn pipe(&self, spine: &Wire, profile: &Shape) -> KernelResult<Shape> {
        self.record(Call::Pipe);
        Ok(Compound::new(vec![spine.as_shape(), profile.clone()]).as_shape())
    }

    fn volume(&self, shape: &Shape) -> KernelResult<f64> {
        self.record(Call::Volume);
        Ok(crate::bbox::volume(shape))
    }

    fn read(&self, path: &Path, format: FileFormat) -> KernelResult<TransferResult> {
        self.record(Call::Read(path.to_path_buf(), format));
        self.read_result
            .clone()
            .ok_or_else(|| KernelError::FileIo("Fail".into()))
    }

    fn write_step(
        &self,
        shape: &Shape,
        path: &Path,
        options: &StepWriteOptions,
    ) -> KernelResult<()> {
        self.record(Call::WriteStep(path.to_path_buf(), options.clone()));
        let contents = format!(
            "ISO-10303-21;\n/* {:?} in {} */\n",
            shape.shape_type(),
            options.unit
        );
        fs::write(path, contents).map_err(|e| KernelError::FileIo(e.to_string()))
    }

    fn read_step_document(&self, path: &Path, doc: &mut Doc) -> KernelResult<()> {
        self.record(Call::ReadStepDocument(path.to_path_buf()));
        let cube = primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO)
            .map_err(|e| KernelError::Transfer(e.to_string()))?;
        doc.add_shape(cube, "MockBox");
        Ok(())
    }

    fn write_step_document(
        &self,
        doc: &Doc,
        path: &Path,
        options: &StepWriteOptions,
    ) -> KernelResult<()> {
        self.record(Call::WriteStepDocument(path.to_path_buf(), options.clone()));
        let mut contents = format!("ISO-10303-21;\n/* author: {} */\n", options.author);
        for label in doc.shape_tool().free_shapes() {
            contents.push_str(doc.name(label).unwrap_or(""));
            contents.push('\n');
        }
        fs::write(path, contents).map_err(|e| KernelError::FileIo(e.to_string()))
    }
}
