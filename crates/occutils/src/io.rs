//! STEP / IGES import

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::Kernel;
use crate::topology::Shape;

/// Exchange file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    Step,
    Iges,
}

/// Length units accepted by STEP export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepUnit {
    #[default]
    #[serde(rename = "MM")]
    Mm,
    #[serde(rename = "INCH")]
    Inch,
    #[serde(rename = "FT")]
    Ft,
    #[serde(rename = "MI")]
    Mi,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "KM")]
    Km,
    #[serde(rename = "MIL")]
    Mil,
    #[serde(rename = "UM")]
    Um,
    #[serde(rename = "CM")]
    Cm,
    #[serde(rename = "UI")]
    Ui,
}

impl StepUnit {
    pub const ALL: [StepUnit; 10] = [
        StepUnit::Mm,
        StepUnit::Inch,
        StepUnit::Ft,
        StepUnit::Mi,
        StepUnit::M,
        StepUnit::Km,
        StepUnit::Mil,
        StepUnit::Um,
        StepUnit::Cm,
        StepUnit::Ui,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepUnit::Mm => "MM",
            StepUnit::Inch => "INCH",
            StepUnit::Ft => "FT",
            StepUnit::Mi => "MI",
            StepUnit::M => "M",
            StepUnit::Km => "KM",
            StepUnit::Mil => "MIL",
            StepUnit::Um => "UM",
            StepUnit::Cm => "CM",
            StepUnit::Ui => "UI",
        }
    }
}

impl fmt::Display for StepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StepUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Wrong units name: {}", s)))
    }
}

/// Read `path` (STEP or IGES, by extension) into a single shape
pub fn read(kernel: &dyn Kernel, path: impl AsRef<Path>) -> Result<Shape> {
    let path = path.as_ref();
    let format = reader::format_for_path(path)?;
    let result = reader::read_file(kernel, format, path)?;
    reader::read_one_shape(result)
}

/// The individual steps of [`read`]
pub mod reader {
    use std::path::Path;

    use super::FileFormat;
    use crate::compound;
    use crate::error::{Error, Result};
    use crate::kernel::{Kernel, KernelError, TransferResult};
    use crate::topology::Shape;

    /// Pick the reader from the (case-insensitive) file extension
    pub fn format_for_path(path: &Path) -> Result<FileFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("step") | Some("stp") => Ok(FileFormat::Step),
            Some("iges") | Some("igs") => Ok(FileFormat::Iges),
            _ => Err(Error::Io(format!(
                "Unknown file extension (.stp/.step or .igs/.iges expected): {}",
                path.display()
            ))),
        }
    }

    pub fn read_file(
        kernel: &dyn Kernel,
        format: FileFormat,
        path: &Path,
    ) -> Result<TransferResult> {
        tracing::debug!("Reading {:?} file {}", format, path.display());
        kernel.read(path, format).map_err(|e| match e {
            KernelError::FileIo(status) => {
                tracing::warn!("Failed to read {}: {}", path.display(), status);
                Error::Io(format!("Failed to read file, error code: {}", status))
            }
            other => other.into(),
        })
    }

    /// Collapse the transferred roots into one shape (a compound if there
    /// are several)
    pub fn read_one_shape(result: TransferResult) -> Result<Shape> {
        if result.roots < 1 {
            return Err(Error::Io(
                "Failed to read file: No roots to transfer are present".into(),
            ));
        }
        let mut shapes = result.shapes;
        match shapes.len() {
            0 => Err(Error::Io(
                "Failed to read file: Failed to transfer any roots".into(),
            )),
            1 => Ok(shapes.remove(0)),
            _ => Ok(compound::from(shapes).into()),
        }
    }
}
