//! Extended data exchange documents
//!
//! A [`Doc`] associates shapes with names, colors and materials and can be
//! read from / written to STEP through a [`crate::kernel::Kernel`].

mod app;
mod color;
mod doc;
mod label;
mod material;
mod properties;
mod tools;

pub use app::{App, DOCUMENT_FORMAT};
pub use color::{Color, ColorRgba, ColorType};
pub use doc::Doc;
pub use label::{Label, LabelTree};
pub use material::Material;
pub use properties::ShapeProperties;
pub use tools::{ColorTool, MaterialTool, ShapeTool};
