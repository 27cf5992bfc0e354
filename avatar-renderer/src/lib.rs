//! # Julia Avatar Renderer
//!
//! Turns identifiers into PNG avatars and memoises them.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              AvatarRenderer                 │
//! ├─────────────────────────────────────────────┤
//! │  SharedCache (FIFO, max 100 by default)     │
//! │        │ miss                               │
//! │        ▼                                    │
//! │  render ─▶ PixelBuffer ─▶ PNG ─▶ data URI   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The cache is an explicit value, not process-global state: create one
//! [`AvatarRenderer`] and clone it wherever avatars are needed. Clones share
//! the same cache.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod raster;
pub mod render;

pub use cache::sync::SharedCache;
pub use cache::{CacheConfig, CacheStats, FifoCache, DEFAULT_MAX_ENTRIES};
pub use error::{RenderError, RenderResult};
pub use raster::{PixelBuffer, RenderedImage};
pub use render::{render, render_pixels, RenderRequest};

use avatar_core::{DEFAULT_MAX_ITERATIONS, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};

/// Default render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Avatar edge length in pixels.
    pub size: u32,
    /// Escape-iteration budget.
    pub max_iterations: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Cached avatar renderer.
#[derive(Debug, Clone, Default)]
pub struct AvatarRenderer {
    config: RenderConfig,
    cache: SharedCache<RenderedImage>,
}

impl AvatarRenderer {
    /// Create a renderer with the given render defaults and cache bound.
    #[must_use]
    pub fn new(config: RenderConfig, cache: CacheConfig) -> Self {
        Self {
            config,
            cache: SharedCache::with_config(cache),
        }
    }

    /// Render an avatar with the configured size and iteration budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier or configuration is invalid, or
    /// encoding fails.
    pub fn render(&self, identifier: &str) -> RenderResult<RenderedImage> {
        self.get_or_render(identifier, self.config.size, self.config.max_iterations)
    }

    /// Return the cached avatar for this request, rendering it on a miss.
    ///
    /// Invalid requests are rejected before the cache is consulted, and a
    /// failed render is never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier, size or iteration budget is
    /// invalid, encoding fails, or the cache lock is poisoned.
    pub fn get_or_render(
        &self,
        identifier: &str,
        size: u32,
        max_iterations: u32,
    ) -> RenderResult<RenderedImage> {
        let request = RenderRequest::new(identifier, size, max_iterations)?;
        self.cache
            .get_or_try_insert_with(&request.cache_key(), || render(&request))
    }

    /// CSS background (`url(data:image/png;base64,...)`) for an identifier at
    /// `size` pixels, using the configured iteration budget.
    ///
    /// # Errors
    ///
    /// See [`AvatarRenderer::get_or_render`].
    pub fn background(&self, identifier: &str, size: u32) -> RenderResult<String> {
        let image = self.get_or_render(identifier, size, self.config.max_iterations)?;
        Ok(image.to_css_background())
    }

    /// The render defaults.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &SharedCache<RenderedImage> {
        &self.cache
    }

    /// Snapshot of cache statistics.
    #[must_use]
    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.stats()
    }
}
