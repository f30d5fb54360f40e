//! Compound construction

use crate::topology::{Compound, Shape};

/// Group shapes into a compound
///
/// Accepts any iterator of shapes or typed shapes (solids, faces, ...).
pub fn from<I>(shapes: I) -> Compound
where
    I: IntoIterator,
    I::Item: Into<Shape>,
{
    Compound::new(shapes.into_iter().map(Into::into).collect())
}
