//! Error types for movebuf.

use std::collections::TryReserveError;
use std::fmt;

/// Errors that can occur while constructing or copying buffers.
///
/// Only the copying paths can fail. Moves never allocate and therefore
/// never return this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Storage for the requested number of elements could not be obtained.
    AllocationFailed {
        /// Number of elements that was requested.
        requested: usize,
        /// The underlying reservation failure.
        source: TryReserveError,
    },

    /// The requested length cannot be initialized with `0..len` as `i32`.
    LengthTooLarge {
        /// The length that was requested.
        requested: usize,
        /// The maximum supported length.
        max: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::AllocationFailed { requested, source } => {
                write!(
                    f,
                    "allocation failed: {} elements requested ({})",
                    requested, source
                )
            }
            BufferError::LengthTooLarge { requested, max } => {
                write!(f, "length too large: {} elements (max {})", requested, max)
            }
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::AllocationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl BufferError {
    pub(crate) fn allocation(requested: usize, source: TryReserveError) -> Self {
        BufferError::AllocationFailed { requested, source }
    }
}
