//! Curve and surface geometry carried by edges and faces

use std::f64::consts::TAU;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::geom::{Axis2, Dir, Plane};

/// Classification of edge curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveType {
    Line,
    Circle,
    Ellipse,
    Other,
}

/// 3D curve geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// Parametrized by the distance from `origin`
    Line { origin: DVec3, direction: Dir },
    /// Parametrized by the angle from the frame's X direction
    Circle { position: Axis2, radius: f64 },
    /// Major radius along the frame's X direction
    Ellipse {
        position: Axis2,
        major_radius: f64,
        minor_radius: f64,
    },
    /// Piecewise linear curve produced by a kernel. Parameter `i` is the
    /// `i`-th point.
    Polyline(Vec<DVec3>),
}

impl Curve {
    pub fn curve_type(&self) -> CurveType {
        match self {
            Curve::Line { .. } => CurveType::Line,
            Curve::Circle { .. } => CurveType::Circle,
            Curve::Ellipse { .. } => CurveType::Ellipse,
            Curve::Polyline(_) => CurveType::Other,
        }
    }

    /// Point at parameter `t`
    pub fn value(&self, t: f64) -> DVec3 {
        match self {
            Curve::Line { origin, direction } => *origin + *direction * t,
            Curve::Circle { position, radius } => {
                position.point_at(radius * t.cos(), radius * t.sin(), 0.0)
            }
            Curve::Ellipse {
                position,
                major_radius,
                minor_radius,
            } => position.point_at(major_radius * t.cos(), minor_radius * t.sin(), 0.0),
            Curve::Polyline(points) => match points.len() {
                0 => DVec3::ZERO,
                1 => points[0],
                n => {
                    let i = (t.floor().max(0.0) as usize).min(n - 2);
                    let s = (t - i as f64).clamp(0.0, 1.0);
                    points[i].lerp(points[i + 1], s)
                }
            },
        }
    }

    /// First derivative at parameter `t`
    pub fn derivative(&self, t: f64) -> DVec3 {
        match self {
            Curve::Line { direction, .. } => direction.get(),
            Curve::Circle { position, radius } => {
                position.x_direction.get() * (-radius * t.sin())
                    + position.y_direction().get() * (radius * t.cos())
            }
            Curve::Ellipse {
                position,
                major_radius,
                minor_radius,
            } => {
                position.x_direction.get() * (-major_radius * t.sin())
                    + position.y_direction().get() * (minor_radius * t.cos())
            }
            Curve::Polyline(points) => match points.len() {
                0 | 1 => DVec3::ZERO,
                n => {
                    let i = (t.floor().max(0.0) as usize).min(n - 2);
                    points[i + 1] - points[i]
                }
            },
        }
    }

    /// Circles and ellipses repeat every full turn
    pub fn is_periodic(&self) -> bool {
        matches!(self, Curve::Circle { .. } | Curve::Ellipse { .. })
    }

    /// Parameter of the point closest to `pnt` (exact for lines and circles,
    /// nearest vertex parameter for polylines)
    pub fn parameter_of(&self, pnt: DVec3) -> f64 {
        match self {
            Curve::Line { origin, direction } => (pnt - *origin).dot(direction.get()),
            Curve::Circle { position, .. } => {
                let local = position.to_local(pnt);
                local.y.atan2(local.x).rem_euclid(TAU)
            }
            Curve::Ellipse {
                position,
                major_radius,
                minor_radius,
            } => {
                let local = position.to_local(pnt);
                (local.y / minor_radius)
                    .atan2(local.x / major_radius)
                    .rem_euclid(TAU)
            }
            Curve::Polyline(points) => points
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.distance_squared(pnt)
                        .partial_cmp(&b.distance_squared(pnt))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i as f64)
                .unwrap_or(0.0),
        }
    }

    /// Arc length between two parameters
    pub fn length_between(&self, first: f64, last: f64) -> f64 {
        let (lo, hi) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        match self {
            Curve::Line { .. } => hi - lo,
            Curve::Circle { radius, .. } => radius * (hi - lo),
            Curve::Ellipse { .. } => simpson(|t| self.derivative(t).length(), lo, hi, 256),
            Curve::Polyline(points) => {
                if points.len() < 2 {
                    return 0.0;
                }
                let mut breaks = vec![lo];
                let mut k = lo.floor() + 1.0;
                while k < hi {
                    breaks.push(k);
                    k += 1.0;
                }
                breaks.push(hi);
                breaks
                    .windows(2)
                    .map(|w| self.value(w[0]).distance(self.value(w[1])))
                    .sum()
            }
        }
    }
}

/// Composite Simpson rule with `n` (even) intervals
fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let n = if n % 2 == 1 { n + 1 } else { n.max(2) };
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + h * i as f64);
    }
    sum * h / 3.0
}

/// Classification of face surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    Plane,
    Cylinder,
    Cone,
    Other,
}

/// Surface geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    /// `(u, v)` are in-plane coordinates
    Plane(Plane),
    /// `u` is the angle, `v` the height along the axis
    Cylinder { position: Axis2, radius: f64 },
    /// Radius `ref_radius` at `v = 0`, growing by `sin(semi_angle)` per unit
    /// of `v`
    Cone {
        position: Axis2,
        ref_radius: f64,
        semi_angle: f64,
    },
    /// Kernel surface without an analytic description here
    Other,
}

impl Surface {
    pub fn surface_type(&self) -> SurfaceType {
        match self {
            Surface::Plane(_) => SurfaceType::Plane,
            Surface::Cylinder { .. } => SurfaceType::Cylinder,
            Surface::Cone { .. } => SurfaceType::Cone,
            Surface::Other => SurfaceType::Other,
        }
    }

    /// Point at `(u, v)`
    pub fn value(&self, u: f64, v: f64) -> Option<DVec3> {
        match self {
            Surface::Plane(plane) => Some(plane.value(u, v)),
            Surface::Cylinder { position, radius } => {
                Some(position.point_at(radius * u.cos(), radius * u.sin(), v))
            }
            Surface::Cone {
                position,
                ref_radius,
                semi_angle,
            } => {
                let r = ref_radius + v * semi_angle.sin();
                Some(position.point_at(r * u.cos(), r * u.sin(), v * semi_angle.cos()))
            }
            Surface::Other => None,
        }
    }

    /// Unnormalized normal `dP/du x dP/dv` at `(u, v)`
    pub fn normal_vector(&self, u: f64, v: f64) -> Option<DVec3> {
        match self {
            Surface::Plane(plane) => Some(plane.normal().get()),
            Surface::Cylinder { position, radius } => {
                let radial = position.x_direction.get() * u.cos()
                    + position.y_direction().get() * u.sin();
                Some(radial * *radius)
            }
            Surface::Cone {
                position,
                ref_radius,
                semi_angle,
            } => {
                let x = position.x_direction.get();
                let y = position.y_direction().get();
                let z = position.direction.get();
                let r = ref_radius + v * semi_angle.sin();
                let du = (y * u.cos() - x * u.sin()) * r;
                let dv = (x * u.cos() + y * u.sin()) * semi_angle.sin() + z * semi_angle.cos();
                Some(du.cross(dv))
            }
            Surface::Other => None,
        }
    }

    /// Unit normal at `(u, v)`, `None` where the surface is degenerate
    pub fn normal(&self, u: f64, v: f64) -> Option<Dir> {
        self.normal_vector(u, v).and_then(Dir::new)
    }
}
