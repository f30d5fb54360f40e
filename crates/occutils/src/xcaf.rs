//! Convenience facade over an XDE document
//!
//! Keeps the labels of added shapes in insertion order so that they can be
//! addressed by index.

use std::path::Path;

use crate::error::Result;
use crate::io::StepUnit;
use crate::kernel::Kernel;
use crate::topology::Shape;
use crate::xde::{App, Color, ColorType, Doc, Label, Material, ShapeProperties};

/// A document plus the labels of the shapes added through it
#[derive(Debug, Clone)]
pub struct ExtendedXcafApplication {
    document: Doc,
    shape_labels: Vec<Label>,
}

impl Default for ExtendedXcafApplication {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtendedXcafApplication {
    pub fn new() -> Self {
        Self {
            document: App::instance().new_document(),
            shape_labels: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: impl Into<Shape>, name: &str) -> Label {
        let label = self.document.add_shape(shape, name);
        self.shape_labels.push(label);
        label
    }

    pub fn add_shape_with_color(
        &mut self,
        shape: impl Into<Shape>,
        color: Color,
        name: &str,
        color_type: ColorType,
    ) -> Label {
        let mut props = ShapeProperties::new();
        props.set_name(name).set_color(color, color_type);
        self.add_shape_with_props(shape, &props)
    }

    pub fn add_shape_with_props(
        &mut self,
        shape: impl Into<Shape>,
        props: &ShapeProperties,
    ) -> Label {
        let label = self.document.add_shape_with_props(shape, props);
        self.shape_labels.push(label);
        label
    }

    /// Label of the `index`-th shape added through this application
    pub fn shape_label(&self, index: usize) -> Option<Label> {
        self.shape_labels.get(index).copied()
    }

    pub fn shape_count(&self) -> usize {
        self.shape_labels.len()
    }

    pub fn find_or_create_material(&mut self, material: &Material) -> Label {
        self.document.find_or_create_material(material)
    }

    pub fn materials(&self) -> Vec<Label> {
        self.document.materials()
    }

    pub fn shape(&self, label: Label) -> Option<Shape> {
        self.document.shape(label)
    }

    pub fn one_shape(&self) -> Option<Shape> {
        self.document.one_shape()
    }

    pub fn reset_colors(&mut self) {
        self.document.reset_colors();
    }

    pub fn document(&self) -> &Doc {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Doc {
        &mut self.document
    }

    /// Read a STEP file into the document
    pub fn read_step(&mut self, kernel: &dyn Kernel, path: impl AsRef<Path>) -> Result<()> {
        self.document.load_step(kernel, path)
    }

    /// Write the document, creating missing parent directories
    pub fn write_step(
        &self,
        kernel: &dyn Kernel,
        path: impl AsRef<Path>,
        unit: StepUnit,
    ) -> Result<()> {
        self.document.save_step(kernel, path, unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::mock::MockKernel;
    use crate::primitive::{self, PositionCentering};
    use glam::DVec3;

    fn cube() -> Shape {
        primitive::make_cube(1.0, PositionCentering::CenterX, DVec3::ZERO)
            .unwrap()
            .as_shape()
    }

    #[test]
    fn test_labels_by_index() {
        let mut app = ExtendedXcafApplication::new();
        let first = app.add_shape(cube(), "first");
        let second = app.add_shape_with_color(cube(), Color::GREEN, "second", ColorType::Surface);

        assert_eq!(app.shape_count(), 2);
        assert_eq!(app.shape_label(0), Some(first));
        assert_eq!(app.shape_label(1), Some(second));
        assert_eq!(app.shape_label(2), None);
        assert_eq!(app.document().color_rgb(second), Some(Color::GREEN));
        assert_eq!(app.document().name(second), Some("second"));
    }

    #[test]
    fn test_materials_are_shared() {
        let mut app = ExtendedXcafApplication::new();
        let steel = Material::new("Steel", "High-grade steel", 7.85, "kg/m^3", "Density");
        let mut props = ShapeProperties::new();
        props.set_material(steel.clone());
        app.add_shape_with_props(cube(), &props);
        app.add_shape_with_props(cube(), &props);
        assert_eq!(app.materials().len(), 1);
        assert_eq!(app.find_or_create_material(&steel), app.materials()[0]);
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("app.step");
        let kernel = MockKernel::new();

        let mut app = ExtendedXcafApplication::new();
        app.add_shape(cube(), "part");
        app.write_step(&kernel, &path, StepUnit::Cm).unwrap();
        assert!(path.exists());

        let mut other = ExtendedXcafApplication::new();
        other.read_step(&kernel, &path).unwrap();
        assert!(other.one_shape().is_some());
    }

    #[test]
    fn test_reset_colors() {
        let mut app = ExtendedXcafApplication::new();
        let label = app.add_shape_with_color(cube(), Color::RED, "red", ColorType::Generic);
        app.reset_colors();
        assert_eq!(app.document().color(label), None);
    }
}
