//! Infinite 2D lines

use glam::DVec2;

use super::Axis2d;
use crate::config::ANGULAR;

/// Whether both lines have the same direction up to orientation
pub fn is_parallel(a: &Axis2d, b: &Axis2d) -> bool {
    let angle = a.direction.crossed(&b.direction).abs().asin();
    angle <= ANGULAR
}

/// Intersection point of two lines, `None` for parallel (or identical) lines
pub fn intersection(a: &Axis2d, b: &Axis2d) -> Option<DVec2> {
    if is_parallel(a, b) {
        return None;
    }
    let da = a.direction.get();
    let db = b.direction.get();
    let denom = da.perp_dot(db);
    let t = (b.location - a.location).perp_dot(db) / denom;
    Some(a.location + da * t)
}
