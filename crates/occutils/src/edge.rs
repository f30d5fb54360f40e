//! Edge construction

use std::f64::consts::TAU;

use glam::DVec3;

use crate::config::CONFUSION;
use crate::curve;
use crate::error::{Error, Result};
use crate::geom::{Axis1, Axis2, Dir, IsEqual, ax2};
use crate::topology::{Curve, Edge, Vertex};

/// Straight edge from `p1` to `p2`, `None` if the points coincide
pub fn from_points(p1: DVec3, p2: DVec3) -> Option<Edge> {
    if p1.is_equal(&p2) {
        return None;
    }
    Edge::line(&Vertex::new(p1), &Vertex::new(p2)).ok()
}

/// Full circle around OZ
pub fn full_circle(radius: f64) -> Result<Edge> {
    full_circle_ax2(&ax2::oz(), radius)
}

/// Full circle around an axis through the origin
pub fn full_circle_dir(direction: Dir, radius: f64) -> Result<Edge> {
    full_circle_ax2(&Axis2::new(DVec3::ZERO, direction), radius)
}

pub fn full_circle_axis(axis: &Axis1, radius: f64) -> Result<Edge> {
    full_circle_ax2(&ax2::from_ax1(axis), radius)
}

pub fn full_circle_at(center: DVec3, direction: Dir, radius: f64) -> Result<Edge> {
    full_circle_axis(&Axis1::new(center, direction), radius)
}

pub fn full_circle_ax2(axis: &Axis2, radius: f64) -> Result<Edge> {
    check_radius(radius)?;
    Edge::new(
        Curve::Circle {
            position: *axis,
            radius,
        },
        0.0,
        TAU,
    )
}

/// Arc of the circle `(axis, radius)` running counter-clockwise about the
/// axis from `p1` to `p2`
pub fn circle_segment(axis: &Axis2, radius: f64, p1: DVec3, p2: DVec3) -> Result<Edge> {
    check_radius(radius)?;
    let circle = Curve::Circle {
        position: *axis,
        radius,
    };
    for p in [p1, p2] {
        let local = axis.to_local(p);
        let off_circle = (local.x.hypot(local.y) - radius).abs();
        if off_circle > CONFUSION || local.z.abs() > CONFUSION {
            return Err(Error::InvalidArgument(format!(
                "Point [{}, {}, {}] does not lie on the circle",
                p.x, p.y, p.z
            )));
        }
    }
    if p1.is_equal(&p2) {
        return Err(Error::InvalidArgument(
            "Circle segment end points coincide".into(),
        ));
    }

    let first = circle.parameter_of(p1);
    let mut last = circle.parameter_of(p2);
    if last <= first {
        last += TAU;
    }
    Edge::new(circle, first, last)
}

/// Length of the edge's curve over its range
pub fn length(edge: &Edge) -> f64 {
    curve::length(&curve::from_edge(edge))
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_nan() || radius <= CONFUSION {
        return Err(Error::InvalidArgument(format!(
            "Circle radius must be positive, got {}",
            radius
        )));
    }
    Ok(())
}
