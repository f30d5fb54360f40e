//! Geometry kernel abstraction
//!
//! The utilities in this crate build and inspect topology themselves and
//! hand the heavy lifting (booleans, fillets, exchange files) to a
//! [`Kernel`] implementation.

mod traits;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "truck")]
mod truck;

pub use traits::*;

#[cfg(feature = "truck")]
pub use truck::TruckKernel;
