//! Colors attached to document labels

use serde::{Deserialize, Serialize};

/// RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };
    pub const YELLOW: Color = Color { r: 1.0, g: 1.0, b: 0.0 };
    pub const CYAN: Color = Color { r: 0.0, g: 1.0, b: 1.0 };
    pub const MAGENTA: Color = Color { r: 1.0, g: 0.0, b: 1.0 };
    pub const GRAY: Color = Color { r: 0.5, g: 0.5, b: 0.5 };

    /// Components are clamped into `0.0..=1.0`
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// RGB color with an alpha channel (1.0 = opaque)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub rgb: Color,
    pub alpha: f32,
}

impl ColorRgba {
    pub fn new(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self {
            rgb: Color::new(r, g, b),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.rgb.r, self.rgb.g, self.rgb.b, self.alpha]
    }
}

impl Default for ColorRgba {
    fn default() -> Self {
        Color::default().into()
    }
}

impl From<Color> for ColorRgba {
    fn from(rgb: Color) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

/// What a color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ColorType {
    /// Whole shape
    #[default]
    Generic,
    /// Faces
    Surface,
    /// Edges and curves
    Curve,
}

impl ColorType {
    /// Lookup order when a label has several colors
    pub const PRIORITY: [ColorType; 3] = [ColorType::Surface, ColorType::Generic, ColorType::Curve];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_are_clamped() {
        let c = Color::new(1.5, -0.2, 0.3);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.3]);
        assert_eq!(ColorRgba::new(0.0, 0.0, 0.0, 2.0).alpha, 1.0);
    }

    #[test]
    fn test_rgb_is_opaque() {
        let rgba: ColorRgba = Color::RED.into();
        assert_eq!(rgba.alpha, 1.0);
        assert_eq!(rgba.with_alpha(0.25).rgb, Color::RED);
    }
}
