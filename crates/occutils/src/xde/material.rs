//! Material records

use serde::{Deserialize, Serialize};

/// Material stored in the document's material table
///
/// Two materials are the same when every field matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub description: String,
    pub density: f64,
    /// Name of the density measurement, e.g. `"Density"`
    pub density_name: String,
    /// Unit of the density value, e.g. `"kg/m^3"`
    pub density_value_type: String,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        density: f64,
        density_name: impl Into<String>,
        density_value_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            density,
            density_name: density_name.into(),
            density_value_type: density_value_type.into(),
        }
    }

    /// True when every field is empty / zero
    pub fn is_null(&self) -> bool {
        self.name.is_empty()
            && self.description.is_empty()
            && self.density == 0.0
            && self.density_name.is_empty()
            && self.density_value_type.is_empty()
    }
}
