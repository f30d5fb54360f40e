//! Boolean operations on shape lists
//!
//! All entry points accept anything implementing [`IntoShapeList`]: a single
//! shape, a typed shape, or a vector / slice / array of either.

use crate::error::{Error, Result};
use crate::kernel::{BooleanOp, Kernel};
use crate::topology::{CompSolid, Compound, Edge, Face, Shape, Shell, Solid, Vertex, Wire};

/// Ordered list of shapes handed to the kernel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeList(Vec<Shape>);

impl ShapeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.0.push(shape.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Shape> {
        self.0
    }

    /// First `n` shapes and the rest
    pub fn split_head(mut self, n: usize) -> (ShapeList, ShapeList) {
        let tail = self.0.split_off(n.min(self.0.len()));
        (self, ShapeList(tail))
    }
}

impl From<Vec<Shape>> for ShapeList {
    fn from(shapes: Vec<Shape>) -> Self {
        Self(shapes)
    }
}

impl FromIterator<Shape> for ShapeList {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ShapeList {
    type Item = Shape;
    type IntoIter = std::vec::IntoIter<Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Conversion into a [`ShapeList`]
pub trait IntoShapeList {
    fn into_shape_list(self) -> ShapeList;
}

impl IntoShapeList for ShapeList {
    fn into_shape_list(self) -> ShapeList {
        self
    }
}

impl IntoShapeList for &ShapeList {
    fn into_shape_list(self) -> ShapeList {
        self.clone()
    }
}

macro_rules! single_shape_list {
    ($($ty:ty),*) => {
        $(
            impl IntoShapeList for $ty {
                fn into_shape_list(self) -> ShapeList {
                    ShapeList(vec![self.into()])
                }
            }

            impl IntoShapeList for &$ty {
                fn into_shape_list(self) -> ShapeList {
                    ShapeList(vec![self.clone().into()])
                }
            }
        )*
    };
}

single_shape_list!(Shape, Compound, CompSolid, Solid, Shell, Face, Wire, Edge, Vertex);

impl<T: Into<Shape>> IntoShapeList for Vec<T> {
    fn into_shape_list(self) -> ShapeList {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Shape> + Clone> IntoShapeList for &Vec<T> {
    fn into_shape_list(self) -> ShapeList {
        self.as_slice().into_shape_list()
    }
}

impl<T: Into<Shape> + Clone> IntoShapeList for &[T] {
    fn into_shape_list(self) -> ShapeList {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Into<Shape>, const N: usize> IntoShapeList for [T; N] {
    fn into_shape_list(self) -> ShapeList {
        self.into_iter().map(Into::into).collect()
    }
}

/// Fuse all shapes together
///
/// The first shape is used as tool, the rest as arguments. Zero shapes give
/// `None`, a single shape is returned as-is.
pub fn fuse(kernel: &dyn Kernel, shapes: impl IntoShapeList) -> Result<Option<Shape>> {
    let (head, tail) = shapes.into_shape_list().split_head(1);
    fuse_with(kernel, tail, head)
}

/// Fuse `arguments` with `tools`
pub fn fuse_with(
    kernel: &dyn Kernel,
    arguments: impl IntoShapeList,
    tools: impl IntoShapeList,
) -> Result<Option<Shape>> {
    let arguments = arguments.into_shape_list();
    let tools = tools.into_shape_list();
    match arguments.len() + tools.len() {
        0 => return Ok(None),
        1 => return Ok(arguments.into_iter().chain(tools).next()),
        _ => {}
    }
    require_shapes("Fuse", &arguments, &tools)?;
    run(kernel, BooleanOp::Fuse, &arguments, &tools).map(Some)
}

/// Subtract `negative` from `positive`
///
/// Without any negative shapes the positive shapes are fused.
pub fn cut(
    kernel: &dyn Kernel,
    positive: impl IntoShapeList,
    negative: impl IntoShapeList,
) -> Result<Option<Shape>> {
    let positive = positive.into_shape_list();
    let negative = negative.into_shape_list();
    if positive.is_empty() {
        return Err(Error::InvalidArgument(
            "Cut positive must have at least one shape!".into(),
        ));
    }
    if negative.is_empty() {
        return fuse(kernel, positive);
    }
    run(kernel, BooleanOp::Cut, &positive, &negative).map(Some)
}

/// Intersection of `arguments` and `tools`
pub fn common(
    kernel: &dyn Kernel,
    arguments: impl IntoShapeList,
    tools: impl IntoShapeList,
) -> Result<Shape> {
    let arguments = arguments.into_shape_list();
    let tools = tools.into_shape_list();
    require_shapes("Common", &arguments, &tools)?;
    run(kernel, BooleanOp::Common, &arguments, &tools)
}

/// Intersection curves and points between `arguments` and `tools`
pub fn section(
    kernel: &dyn Kernel,
    arguments: impl IntoShapeList,
    tools: impl IntoShapeList,
) -> Result<Shape> {
    let arguments = arguments.into_shape_list();
    let tools = tools.into_shape_list();
    require_shapes("Section", &arguments, &tools)?;
    run(kernel, BooleanOp::Section, &arguments, &tools)
}

fn require_shapes(operation: &str, arguments: &ShapeList, tools: &ShapeList) -> Result<()> {
    if arguments.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{} arguments must have at least one shape!",
            operation
        )));
    }
    if tools.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "{} tools must have at least one shape!",
            operation
        )));
    }
    Ok(())
}

fn run(
    kernel: &dyn Kernel,
    op: BooleanOp,
    arguments: &ShapeList,
    tools: &ShapeList,
) -> Result<Shape> {
    tracing::debug!(
        "Boolean {:?} with {} arguments and {} tools on kernel {}",
        op,
        arguments.len(),
        tools.len(),
        kernel.name()
    );
    kernel
        .boolean(op, arguments.as_slice(), tools.as_slice())
        .map_err(|e| {
            tracing::warn!("Boolean {:?} failed: {}", op, e);
            e.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::mock::{Call, MockKernel};
    use crate::kernel::{KernelError, NullKernel};
    use crate::primitive::{self, PositionCentering};
    use glam::DVec3;

    fn cube(x: f64) -> Solid {
        primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::new(x, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_fuse_nothing() {
        let kernel = MockKernel::new();
        assert_eq!(fuse(&kernel, Vec::<Shape>::new()).unwrap(), None);
        assert!(kernel.calls().is_empty());
    }

    #[test]
    fn test_fuse_single_shape_skips_kernel() {
        let kernel = NullKernel;
        let solid = cube(0.0);
        let result = fuse(&kernel, &solid).unwrap().unwrap();
        assert!(result.is_same(&solid.as_shape()));
    }

    #[test]
    fn test_fuse_splits_head_as_tool() {
        let kernel = MockKernel::new();
        fuse(&kernel, vec![cube(0.0), cube(2.0), cube(4.0)]).unwrap();
        assert_eq!(
            kernel.calls(),
            vec![Call::Boolean {
                op: BooleanOp::Fuse,
                arguments: 2,
                tools: 1
            }]
        );
    }

    #[test]
    fn test_fuse_with_one_empty_list() {
        let kernel = MockKernel::new();
        let err = fuse_with(&kernel, [cube(0.0), cube(1.0)], Vec::<Shape>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("Fuse tools")));
        let err = fuse_with(&kernel, Vec::<Shape>::new(), [cube(0.0), cube(1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("Fuse arguments")));
    }

    #[test]
    fn test_cut_without_negative_fuses() {
        let kernel = MockKernel::new();
        let positive = [cube(0.0), cube(3.0)];
        cut(&kernel, &positive[..], Vec::<Solid>::new()).unwrap();
        assert_eq!(
            kernel.calls(),
            vec![Call::Boolean {
                op: BooleanOp::Fuse,
                arguments: 1,
                tools: 1
            }]
        );
    }

    #[test]
    fn test_cut_requires_positive() {
        let kernel = MockKernel::new();
        let err = cut(&kernel, Vec::<Shape>::new(), cube(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_common_calls_common() {
        let kernel = MockKernel::new();
        common(&kernel, cube(0.0), cube(0.5)).unwrap();
        assert_eq!(
            kernel.calls(),
            vec![Call::Boolean {
                op: BooleanOp::Common,
                arguments: 1,
                tools: 1
            }]
        );
    }

    #[test]
    fn test_section_requires_tools() {
        let kernel = MockKernel::new();
        let err = section(&kernel, cube(0.0), ShapeList::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("Section tools")));
    }

    #[test]
    fn test_kernel_failure_is_propagated() {
        let err = common(&NullKernel, cube(0.0), cube(0.5)).unwrap_err();
        assert!(matches!(
            err,
            Error::Kernel(KernelError::KernelNotAvailable(_))
        ));
    }
}
