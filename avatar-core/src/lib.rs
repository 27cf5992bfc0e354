//! # Julia Avatar Core
//!
//! Deterministic mapping from an identifier (typically a UUID) to the
//! parameters and per-pixel colors of a Julia-set avatar.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌─────────────────┐   ┌──────────────┐   ┌──────────┐
//! │ Identifier │──▶│ JuliaParameters │──▶│ escape_time  │──▶│ colorize │──▶ RGB
//! │ (32 hex)   │   │ c, hue, sat     │   │ z ← z² + c   │   │ HSL      │
//! └────────────┘   └─────────────────┘   └──────────────┘   └──────────┘
//! ```
//!
//! Everything here is pure: the same identifier always yields bit-identical
//! parameters, and the same inputs to [`escape_time`] and [`colorize`] always
//! yield the same outputs. Image assembly, encoding and caching live in
//! `avatar-renderer`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod complex;
pub mod error;
pub mod escape;
pub mod identifier;
pub mod params;

pub use color::{colorize, Rgb};
pub use complex::Complex;
pub use error::{AvatarError, AvatarResult, MAX_SIZE};
pub use escape::{escape_count, escape_time, ESCAPE_RADIUS_SQ};
pub use identifier::Identifier;
pub use params::{derive_parameters, Archetype, JuliaParameters, ARCHETYPES, ARCHETYPE_COUNT};

/// Default avatar edge length in pixels.
pub const DEFAULT_SIZE: u32 = 64;

/// Default escape-iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Avatar core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
