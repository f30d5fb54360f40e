//! Curves underlying edges

use glam::DVec3;

pub use crate::topology::{Curve, CurveType};
use crate::topology::Edge;

/// A curve restricted to a parameter range
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedCurve {
    pub curve: Curve,
    pub first: f64,
    pub last: f64,
}

impl TrimmedCurve {
    pub fn new(curve: Curve, first: f64, last: f64) -> Self {
        Self { curve, first, last }
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve.curve_type()
    }

    pub fn start_point(&self) -> DVec3 {
        self.curve.value(self.first)
    }

    pub fn end_point(&self) -> DVec3 {
        self.curve.value(self.last)
    }
}

/// The curve of `edge` with the edge's parameter bounds
///
/// The edge orientation is ignored, as with the raw curve of a kernel edge.
pub fn from_edge(edge: &Edge) -> TrimmedCurve {
    let (first, last) = edge.range();
    TrimmedCurve::new(edge.curve().clone(), first, last)
}

/// Arc length of a trimmed curve
pub fn length(curve: &TrimmedCurve) -> f64 {
    curve.curve.length_between(curve.first, curve.last)
}

pub fn is_line(curve: &TrimmedCurve) -> bool {
    curve.curve_type() == CurveType::Line
}

pub fn is_circle(curve: &TrimmedCurve) -> bool {
    curve.curve_type() == CurveType::Circle
}

pub fn is_ellipse(curve: &TrimmedCurve) -> bool {
    curve.curve_type() == CurveType::Ellipse
}

pub fn is_other(curve: &TrimmedCurve) -> bool {
    curve.curve_type() == CurveType::Other
}

/// Operations on lists of curves
pub mod curves {
    use super::{CurveType, TrimmedCurve};

    /// Curves of the given type only
    pub fn only(curves: &[TrimmedCurve], curve_type: CurveType) -> Vec<TrimmedCurve> {
        curves
            .iter()
            .filter(|c| c.curve_type() == curve_type)
            .cloned()
            .collect()
    }
}
