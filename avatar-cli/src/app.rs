//! Batch avatar rendering for the command line.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use avatar_core::{derive_parameters, escape_count, Complex, Identifier, JuliaParameters};
use avatar_renderer::AvatarRenderer;
use serde::Serialize;

use crate::{CliConfig, OutputFormat};

/// One line of `--format params` output.
#[derive(Debug, Clone, Serialize)]
pub struct ParamsRecord {
    /// Canonical identifier.
    pub identifier: String,
    /// Name of the base archetype.
    pub archetype: &'static str,
    /// Derived parameters.
    pub params: JuliaParameters,
    /// Integer escape step of the critical orbit (`z0 = 0`) within the
    /// iteration budget; equal to the budget when the center is inside.
    pub center_escape: u32,
}

/// Command-line avatar application.
pub struct AvatarApp {
    config: CliConfig,
    renderer: AvatarRenderer,
}

impl AvatarApp {
    /// Create an application with the given configuration.
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let renderer = AvatarRenderer::new(config.render, config.cache);
        Self { config, renderer }
    }

    /// Render every identifier, writing text output to `out`.
    ///
    /// Returns the paths of any PNG files written.
    ///
    /// # Errors
    ///
    /// Fails on the first identifier that cannot be rendered, or on any I/O
    /// error.
    pub fn run<W: Write>(&self, identifiers: &[String], out: &mut W) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for identifier in identifiers {
            match self.config.format {
                OutputFormat::Params => {
                    let params = derive_parameters(identifier)
                        .with_context(|| format!("Failed to derive parameters for {identifier}"))?;
                    let record = ParamsRecord {
                        identifier: Identifier::parse(identifier)?.to_string(),
                        archetype: params.archetype().name,
                        center_escape: escape_count(
                            Complex::ZERO,
                            params.c,
                            self.config.render.max_iterations,
                        ),
                        params,
                    };
                    writeln!(out, "{}", serde_json::to_string(&record)?)?;
                }
                OutputFormat::DataUri => {
                    let image = self.render(identifier)?;
                    writeln!(out, "{}", image.to_data_uri())?;
                }
                OutputFormat::Css => {
                    let css = self
                        .renderer
                        .background(identifier, self.config.render.size)
                        .with_context(|| format!("Failed to render {identifier}"))?;
                    writeln!(out, "{css}")?;
                }
                OutputFormat::Png => {
                    written.push(self.write_png(identifier)?);
                }
            }
        }

        if let Some(stats) = self.renderer.stats() {
            tracing::debug!(
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                "render cache stats"
            );
        }

        Ok(written)
    }

    /// The underlying renderer.
    #[must_use]
    pub fn renderer(&self) -> &AvatarRenderer {
        &self.renderer
    }

    fn render(&self, identifier: &str) -> Result<avatar_renderer::RenderedImage> {
        self.renderer
            .render(identifier)
            .with_context(|| format!("Failed to render {identifier}"))
    }

    fn write_png(&self, identifier: &str) -> Result<PathBuf> {
        let dir = self
            .config
            .out_dir
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No output directory configured"))?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let image = self.render(identifier)?;
        let canonical = Identifier::parse(identifier)?;
        let path = dir.join(format!("{canonical}-{}.png", self.config.render.size));
        fs::write(&path, image.as_png())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }
}
