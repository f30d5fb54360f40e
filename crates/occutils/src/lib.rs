//! B-Rep Convenience Utilities
//!
//! This crate provides:
//! - Boundary representation topology (vertices up to compounds) with
//!   analytic curve and surface geometry
//! - Primitive construction (boxes, cubes, cylinders, cones) with centering
//!   options
//! - Shape decomposition, bounding boxes and geometric predicates
//! - Boolean, fillet and pipe helpers over an abstract geometry kernel
//! - STEP / IGES import and export
//! - Extended data exchange (XDE) documents with names, colors and materials

pub mod bbox;
pub mod boolean;
pub mod compound;
pub mod config;
pub mod curve;
pub mod edge;
pub mod error;
pub mod face;
pub mod fillet;
pub mod geom;
pub mod io;
pub mod kernel;
pub mod pipe;
pub mod primitive;
pub mod shape;
pub mod shape_components;
pub mod step_export;
pub mod surface;
pub mod topology;
pub mod wire;
pub mod xcaf;
pub mod xde;

// Re-exports for convenience
pub use bbox::BoundingBox;
pub use boolean::{IntoShapeList, ShapeList};
pub use config::{Settings, StepSettings};
pub use error::{Error, Result};
pub use io::{FileFormat, StepUnit};
pub use kernel::{BooleanOp, Kernel, KernelError, NullKernel, default_kernel};
pub use primitive::PositionCentering;
pub use topology::{
    CompSolid, Compound, Curve, Edge, Face, Orientation, Shape, ShapeType, Shell, Solid, Surface,
    Vertex, Wire,
};
pub use xcaf::ExtendedXcafApplication;
pub use xde::{App, Color, ColorRgba, ColorType, Doc, Label, Material, ShapeProperties};
