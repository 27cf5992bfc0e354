//! Error types for avatar derivation.

use thiserror::Error;

/// Result type for avatar core operations.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Errors that can occur while deriving avatar parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    /// The identifier does not contain 32 hex digits after stripping separators.
    #[error("Invalid identifier {identifier:?}: found {hex_digits} hex digits, need 32")]
    InvalidIdentifier {
        /// The identifier as supplied by the caller.
        identifier: String,
        /// Number of hex digits found.
        hex_digits: usize,
    },

    /// Requested image size is zero or above [`MAX_SIZE`].
    #[error("Invalid size: {0} (must be between 1 and {MAX_SIZE} pixels)")]
    InvalidSize(u32),

    /// Requested iteration budget is zero.
    #[error("Invalid iteration budget: {0} (must be at least 1)")]
    InvalidIterationBudget(u32),

    /// A derived parameter was NaN or infinite.
    #[error("Derived parameter is not finite: {0}")]
    NonFiniteParameter(&'static str),
}

/// Largest accepted avatar edge length in pixels (64 MiB of RGBA).
pub const MAX_SIZE: u32 = 4096;

/// Reject an out-of-range size before any computation.
///
/// # Errors
///
/// Returns [`AvatarError::InvalidSize`] when `size` is zero or above [`MAX_SIZE`].
pub fn validate_size(size: u32) -> AvatarResult<u32> {
    if size == 0 || size > MAX_SIZE {
        return Err(AvatarError::InvalidSize(size));
    }
    Ok(size)
}

/// Reject a zero iteration budget before any computation.
///
/// # Errors
///
/// Returns [`AvatarError::InvalidIterationBudget`] when `max_iterations` is zero.
pub fn validate_iterations(max_iterations: u32) -> AvatarResult<u32> {
    if max_iterations == 0 {
        return Err(AvatarError::InvalidIterationBudget(max_iterations));
    }
    Ok(max_iterations)
}
