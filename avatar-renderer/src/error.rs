//! Renderer error types.

use avatar_core::AvatarError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Identifier, size or iteration budget was rejected.
    #[error(transparent)]
    Avatar(#[from] AvatarError),

    /// The pixel buffer could not be allocated or did not match its dimensions.
    #[error("Pixel buffer error: {0}")]
    Buffer(String),

    /// Encoding or decoding the raster failed.
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// A data URI could not be parsed.
    #[error("Invalid data URI: {0}")]
    DataUri(String),

    /// The shared cache lock was poisoned by a panicking thread.
    #[error("Cache lock poisoned")]
    LockPoisoned,
}
