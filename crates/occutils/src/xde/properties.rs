//! Properties applied when adding a shape to a document

use serde::{Deserialize, Serialize};

use super::{Color, ColorRgba, ColorType, Material};

/// Name, color and material for a new shape label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeProperties {
    pub name: String,
    pub color: Option<(ColorRgba, ColorType)>,
    pub material: Material,
}

impl ShapeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Opaque color
    pub fn set_color(&mut self, color: Color, color_type: ColorType) -> &mut Self {
        self.set_color_rgba(color.into(), color_type)
    }

    pub fn set_color_rgba(&mut self, color: ColorRgba, color_type: ColorType) -> &mut Self {
        self.color = Some((color, color_type));
        self
    }

    pub fn set_material(&mut self, material: Material) -> &mut Self {
        self.material = material;
        self
    }

    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }
}
