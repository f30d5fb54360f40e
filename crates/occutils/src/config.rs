//! Settings shared by the utilities
//!
//! Settings are plain serde structs stored as RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default linear tolerance (two points closer than this are the same point)
pub const CONFUSION: f64 = 1e-7;

/// Default angular tolerance in radians
pub const ANGULAR: f64 = 1e-12;

/// Default fuzzy tolerance handed to boolean backends
pub const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Geometric tolerances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    /// Linear tolerance
    pub confusion: f64,
    /// Angular tolerance in radians
    pub angular: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            confusion: CONFUSION,
            angular: ANGULAR,
        }
    }
}

/// Defaults used when writing STEP files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSettings {
    /// Length unit name (`MM`, `INCH`, ...)
    pub unit: String,
    /// Author written into the STEP header
    pub author: String,
    /// Organization written into the STEP header
    pub organization: String,
    /// Originating system written into the STEP header
    pub originating_system: String,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            unit: "MM".into(),
            author: "occutils".into(),
            organization: "occutils".into(),
            originating_system: "occutils".into(),
        }
    }
}

/// All occutils settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub step: StepSettings,
    #[serde(default = "default_boolean_tolerance")]
    pub boolean_tolerance: f64,
}

fn default_boolean_tolerance() -> f64 {
    BOOLEAN_TOLERANCE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            step: StepSettings::default(),
            boolean_tolerance: BOOLEAN_TOLERANCE,
        }
    }
}

impl Settings {
    /// Parse settings from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize settings to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io(e.to_string()))?;
        let settings = Self::from_ron_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| Error::Io(e.to_string()))?;
        Ok(())
    }
}
