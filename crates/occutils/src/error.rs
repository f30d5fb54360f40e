//! Error types for occutils

use thiserror::Error;

use crate::kernel::KernelError;

/// Errors raised by the utility layer
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Construction failed: {0}")]
    ConstructionFailed(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for utility operations
pub type Result<T> = std::result::Result<T, Error>;
