//! XDE document: shapes with names, colors and materials

use std::fs;
use std::path::Path;

use super::label::{Label, LabelTree};
use super::tools::{ColorTool, MaterialTool, ShapeTool};
use super::{App, Color, ColorRgba, ColorType, Material, ShapeProperties};
use crate::compound;
use crate::config::StepSettings;
use crate::error::{Error, Result};
use crate::io::StepUnit;
use crate::kernel::{Kernel, StepWriteOptions};
use crate::topology::{Shape, ShapeType};

/// A document of labelled shapes
///
/// Shapes live below the shape section of the label tree; colors and
/// materials are shared tables that shape labels refer to.
#[derive(Debug, Clone)]
pub struct Doc {
    tree: LabelTree,
    settings: StepSettings,
}

impl Default for Doc {
    fn default() -> Self {
        Self::new()
    }
}

impl Doc {
    /// Empty document created through the shared [`App`]
    pub fn new() -> Self {
        App::instance().new_document()
    }

    pub(crate) fn with_settings(settings: StepSettings) -> Self {
        Self {
            tree: LabelTree::new(),
            settings,
        }
    }

    /// Discard all content
    pub fn new_document(&mut self) {
        self.tree = LabelTree::new();
    }

    /// STEP header defaults used by [`Doc::save_step`]
    pub fn settings(&self) -> &StepSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut StepSettings {
        &mut self.settings
    }

    /// No shape labels
    pub fn is_empty(&self) -> bool {
        self.tree
            .children(self.tree.shapes_section())
            .is_empty()
    }

    // ============== STEP ==============

    /// Read a STEP file with names, colors, materials and assembly structure
    pub fn load_step(&mut self, kernel: &dyn Kernel, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::info!("Loading STEP document {}", path.display());
        kernel.read_step_document(path, self).map_err(|e| {
            tracing::warn!("Failed to load {}: {}", path.display(), e);
            e.into()
        })
    }

    /// Write the document to a STEP file in `units` (`MM`, `INCH`, ...)
    ///
    /// Missing parent directories are created.
    pub fn save_step(
        &self,
        kernel: &dyn Kernel,
        path: impl AsRef<Path>,
        units: &str,
    ) -> Result<()> {
        self.save_step_with(kernel, path, units, |_| {})
    }

    /// Write the document in the unit of its [`StepSettings`]
    pub fn save_step_in_default_unit(
        &self,
        kernel: &dyn Kernel,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        self.save_step(kernel, path, &self.settings.unit)
    }

    /// Like [`Doc::save_step`], with a hook to adjust the writer options
    /// (header fields, model type) before writing
    pub fn save_step_with<F>(
        &self,
        kernel: &dyn Kernel,
        path: impl AsRef<Path>,
        units: &str,
        customize: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut StepWriteOptions),
    {
        let path = path.as_ref();
        let unit: StepUnit = units.parse().inspect_err(|e| {
            tracing::warn!("{}", e);
        })?;

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|e| {
                Error::Io(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }

        let mut options = StepWriteOptions {
            unit,
            author: self.settings.author.clone(),
            organization: self.settings.organization.clone(),
            originating_system: self.settings.originating_system.clone(),
            ..StepWriteOptions::default()
        };
        customize(&mut options);

        tracing::info!("Saving STEP document {} ({})", path.display(), unit);
        kernel.write_step_document(self, path, &options).map_err(|e| {
            tracing::warn!("Failed to save {}: {}", path.display(), e);
            e.into()
        })
    }

    // ============== Shapes ==============

    /// New top-level shape label, named unless `name` is empty
    pub fn add_shape(&mut self, shape: impl Into<Shape>, name: &str) -> Label {
        let label = self.shape_tool_mut().add_shape(shape.into());
        if !name.is_empty() {
            self.tree.set_name(label, name);
        }
        label
    }

    pub fn add_shape_with_props(
        &mut self,
        shape: impl Into<Shape>,
        props: &ShapeProperties,
    ) -> Label {
        let label = self.add_shape(shape, &props.name);
        if let Some((color, color_type)) = props.color {
            self.color_tool_mut().set_color(label, color, color_type);
        }
        if !props.material.is_null() {
            let material_label = self.find_or_create_material(&props.material);
            self.material_tool_mut().set_material(label, material_label);
        }
        label
    }

    /// First label (depth-first) whose shape is the same as `shape`
    pub fn label_of(&self, shape: &Shape) -> Option<Label> {
        let tool = self.shape_tool();
        self.tree
            .descendants(self.tree.shapes_section())
            .into_iter()
            .find(|label| tool.shape(*label).is_some_and(|s| s.is_same(shape)))
    }

    pub fn shape(&self, label: Label) -> Option<Shape> {
        self.shape_tool().shape(label)
    }

    /// All free shapes: none, the single one, or a compound of them
    pub fn one_shape(&self) -> Option<Shape> {
        let tool = self.shape_tool();
        let mut shapes: Vec<Shape> = tool
            .free_shapes()
            .into_iter()
            .filter_map(|label| tool.shape(label))
            .collect();
        match shapes.len() {
            0 => None,
            1 => shapes.pop(),
            _ => Some(compound::from(shapes).into()),
        }
    }

    pub fn name(&self, label: Label) -> Option<&str> {
        self.tree.name(label)
    }

    pub fn set_name(&mut self, label: Label, name: impl Into<String>) {
        self.tree.set_name(label, name);
    }

    /// Entry path of `label`, e.g. `0:1:1:1`
    pub fn entry(&self, label: Label) -> Option<String> {
        self.tree.entry(label)
    }

    pub fn labels(&self) -> &LabelTree {
        &self.tree
    }

    // ============== Materials ==============

    /// Label of an identical material, added if there is none yet
    pub fn find_or_create_material(&mut self, material: &Material) -> Label {
        let existing = {
            let tool = self.material_tool();
            tool.material_labels()
                .into_iter()
                .find(|label| tool.material(*label).as_ref() == Some(material))
        };
        match existing {
            Some(label) => label,
            None => self.material_tool_mut().add_material(material.clone()),
        }
    }

    pub fn materials(&self) -> Vec<Label> {
        self.material_tool().material_labels()
    }

    // ============== Colors ==============

    /// Color of `label`, looked up on the prototype for components
    ///
    /// Surface colors win over generic ones, generic over curve colors.
    pub fn color(&self, label: Label) -> Option<ColorRgba> {
        let source = self.shape_tool().referred_shape(label).unwrap_or(label);
        let tool = self.color_tool();
        ColorType::PRIORITY
            .into_iter()
            .find_map(|color_type| tool.color(source, color_type))
    }

    pub fn color_rgb(&self, label: Label) -> Option<Color> {
        self.color(label).map(|c| c.rgb)
    }

    /// Alpha of the label's color, falling back to its first sub-shape
    pub fn color_alpha(&self, label: Label) -> Option<f32> {
        if let Some(color) = self.color(label) {
            return Some(color.alpha);
        }
        let first = self.shape_tool().sub_shapes(label).into_iter().next()?;
        self.color(first).map(|c| c.alpha)
    }

    /// Change the RGB part of the color, keeping any existing alpha
    pub fn set_color(&mut self, label: Label, color: Color) {
        let mut rgba = ColorRgba::from(color);
        if let Some(old) = self.color(label) {
            rgba.alpha = old.alpha;
        }
        self.set_color_rgba(label, rgba, true);
    }

    /// Color a shape label
    ///
    /// Components forward to their prototype and assemblies to all of their
    /// components. Edges get a curve color, other shapes surface and curve
    /// colors; an existing generic color is replaced too. Registered
    /// sub-shapes are colored the same way. Without `change_transparency`
    /// the current alpha is kept.
    pub fn set_color_rgba(&mut self, label: Label, color: ColorRgba, change_transparency: bool) {
        if label.is_null() || !self.tree.contains(label) {
            return;
        }

        let prototype = self.shape_tool().referred_shape(label);
        if let Some(prototype) = prototype {
            self.set_color_rgba(prototype, color, change_transparency);
            return;
        }

        if self.shape_tool().is_assembly(label) {
            let components = self.shape_tool().components(label, true);
            for component in components {
                self.set_color_rgba(component, color, change_transparency);
            }
            return;
        }

        let Some(shape) = self.shape(label) else {
            return;
        };
        let mut rgba = color;
        if !change_transparency && let Some(alpha) = self.color_alpha(label) {
            rgba.alpha = alpha;
        }

        self.apply_color(label, shape.shape_type(), rgba);
        let sub_shapes = self.shape_tool().sub_shapes(label);
        for sub in sub_shapes {
            if let Some(sub_shape) = self.shape(sub) {
                self.apply_color(sub, sub_shape.shape_type(), rgba);
            }
        }
    }

    fn apply_color(&mut self, label: Label, shape_type: ShapeType, color: ColorRgba) {
        let mut tool = self.color_tool_mut();
        let had_generic = tool.is_set(label, ColorType::Generic);
        if shape_type == ShapeType::Edge {
            tool.set_color(label, color, ColorType::Curve);
        } else {
            tool.set_color(label, color, ColorType::Surface);
            tool.set_color(label, color, ColorType::Curve);
        }
        if had_generic {
            tool.set_color(label, color, ColorType::Generic);
        }
    }

    /// Remove every color from the document
    pub fn reset_colors(&mut self) {
        let mut tool = self.color_tool_mut();
        for color_label in tool.colors() {
            tool.remove_color(color_label);
        }
    }

    // ============== Tools ==============

    pub fn shape_tool(&self) -> ShapeTool<&LabelTree> {
        ShapeTool::new(&self.tree)
    }

    pub fn shape_tool_mut(&mut self) -> ShapeTool<&mut LabelTree> {
        ShapeTool::new(&mut self.tree)
    }

    pub fn color_tool(&self) -> ColorTool<&LabelTree> {
        ColorTool::new(&self.tree)
    }

    pub fn color_tool_mut(&mut self) -> ColorTool<&mut LabelTree> {
        ColorTool::new(&mut self.tree)
    }

    pub fn material_tool(&self) -> MaterialTool<&LabelTree> {
        MaterialTool::new(&self.tree)
    }

    pub fn material_tool_mut(&mut self) -> MaterialTool<&mut LabelTree> {
        MaterialTool::new(&mut self.tree)
    }
}
