//! Tolerant equality for points, vectors and directions

use glam::{DVec2, DVec3};

use super::{Dir, Dir2d};
use crate::config::Precision;

/// Equality within confusion / angular precision
pub trait IsEqual {
    /// Equality within the given tolerances
    fn is_equal_within(&self, other: &Self, precision: &Precision) -> bool;

    /// Equality within the default tolerances
    fn is_equal(&self, other: &Self) -> bool {
        self.is_equal_within(other, &Precision::default())
    }
}

impl IsEqual for DVec3 {
    fn is_equal_within(&self, other: &Self, precision: &Precision) -> bool {
        self.distance(*other) <= precision.confusion
    }
}

impl IsEqual for DVec2 {
    fn is_equal_within(&self, other: &Self, precision: &Precision) -> bool {
        self.distance(*other) <= precision.confusion
    }
}

impl IsEqual for Dir {
    fn is_equal_within(&self, other: &Self, precision: &Precision) -> bool {
        self.angle(other) <= precision.angular
    }
}

impl IsEqual for Dir2d {
    fn is_equal_within(&self, other: &Self, precision: &Precision) -> bool {
        let cos = self.get().dot(other.get()).clamp(-1.0, 1.0);
        cos.acos() <= precision.angular
    }
}

/// Vector equality: same magnitude within confusion and same direction
/// within angular precision
pub fn vectors_equal(a: DVec3, b: DVec3) -> bool {
    vectors_equal_within(a, b, &Precision::default())
}

pub fn vectors_equal_within(a: DVec3, b: DVec3, precision: &Precision) -> bool {
    let (la, lb) = (a.length(), b.length());
    if (la - lb).abs() > precision.confusion {
        return false;
    }
    if la <= precision.confusion || lb <= precision.confusion {
        return true;
    }
    let cos = (a.dot(b) / (la * lb)).clamp(-1.0, 1.0);
    cos.acos() <= precision.angular
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        assert!(a.is_equal(&(a + DVec3::splat(1e-9))));
        assert!(!a.is_equal(&(a + DVec3::X * 1e-6)));
        assert!(DVec2::ONE.is_equal(&DVec2::ONE));
    }

    #[test]
    fn test_directions() {
        assert!(Dir::X.is_equal(&Dir::X));
        assert!(!Dir::X.is_equal(&Dir::NEG_X));
        assert!(Dir2d::Y.is_equal(&Dir2d::Y));
    }

    #[test]
    fn test_vectors() {
        assert!(vectors_equal(DVec3::new(2.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0)));
        assert!(!vectors_equal(DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0)));
        assert!(!vectors_equal(DVec3::X, DVec3::X * 2.0));
    }

    #[test]
    fn test_loaded_precision_widens_equality() {
        let settings = crate::config::Settings::from_ron_str(
            "(precision: (confusion: 0.001, angular: 0.01))",
        )
        .unwrap();
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = a + DVec3::X * 0.0005;
        assert!(!a.is_equal(&b));
        assert!(a.is_equal_within(&b, &settings.precision));

        let tilted = Dir::new(DVec3::new(1.0, 0.005, 0.0)).unwrap();
        assert!(!Dir::X.is_equal(&tilted));
        assert!(Dir::X.is_equal_within(&tilted, &settings.precision));
        assert!(vectors_equal_within(DVec3::X, b - a + DVec3::X, &settings.precision));
        assert!(!vectors_equal(DVec3::X, b - a + DVec3::X));
    }
}
