//! # Julia Avatar CLI
//!
//! Command-line host for Julia avatars. Stands in for the UI layer that
//! would normally display avatars: it renders identifiers and emits PNG
//! files, data URIs, CSS backgrounds, or the derived parameters as JSON.
//!
//! ## Usage
//!
//! ```bash
//! julia-avatar 550e8400-e29b-41d4-a716-446655440000
//! julia-avatar --format css --size 128 <ID>
//! julia-avatar --format png --out-dir avatars <ID> <ID>
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Render, cache and output settings
//! - `AvatarApp` - Runs a batch of identifiers through a cached renderer

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;

pub use app::{AvatarApp, ParamsRecord};

use std::path::PathBuf;

use avatar_core::{DEFAULT_MAX_ITERATIONS, DEFAULT_SIZE};
use avatar_renderer::{CacheConfig, RenderConfig, DEFAULT_MAX_ENTRIES};
use clap::{Parser, ValueEnum};

/// Command-line arguments for julia-avatar.
#[derive(Debug, Clone, Parser)]
#[command(name = "julia-avatar")]
#[command(about = "Render deterministic Julia-set avatars from UUIDs")]
#[command(version)]
pub struct CliArgs {
    /// Identifiers to render (UUID text; separators are ignored)
    #[arg(required = true)]
    pub identifiers: Vec<String>,

    /// Avatar edge length in pixels
    #[arg(long, env = "JULIA_AVATAR_SIZE", default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Escape-iteration budget
    #[arg(long, env = "JULIA_AVATAR_ITERATIONS", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: u32,

    /// Maximum number of cached renders
    #[arg(long, env = "JULIA_AVATAR_CACHE_CAPACITY", default_value_t = DEFAULT_MAX_ENTRIES)]
    pub cache_capacity: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::DataUri)]
    pub format: OutputFormat,

    /// Directory for PNG output (required with `--format png`)
    #[arg(long, required_if_eq("format", "png"))]
    pub out_dir: Option<PathBuf>,
}

/// What to emit for each identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Write `<id>-<size>.png` files into the output directory.
    Png,
    /// Print a `data:image/png;base64,...` URI per line.
    DataUri,
    /// Print a CSS `url(...)` background per line.
    Css,
    /// Print the derived Julia parameters as JSON, one object per line.
    Params,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Render defaults.
    pub render: RenderConfig,
    /// Cache bound.
    pub cache: CacheConfig,
    /// Output format.
    pub format: OutputFormat,
    /// Output directory for PNG files.
    pub out_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            render: RenderConfig::default(),
            cache: CacheConfig::default(),
            format: OutputFormat::DataUri,
            out_dir: None,
        }
    }
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            render: RenderConfig {
                size: args.size,
                max_iterations: args.iterations,
            },
            cache: CacheConfig {
                max_entries: args.cache_capacity,
            },
            format: args.format,
            out_dir: args.out_dir.clone(),
        }
    }
}
