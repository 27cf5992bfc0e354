//! # Julia Avatar CLI
//!
//! Renders deterministic Julia-set avatars from the command line.

use std::io::{self, BufWriter, Write};

use avatar_cli::{AvatarApp, CliArgs, CliConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing on stderr with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: warn,avatar_cli=info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,avatar_cli=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(&args);

    tracing::debug!(
        size = config.render.size,
        max_iterations = config.render.max_iterations,
        cache_capacity = config.cache.max_entries,
        format = ?config.format,
        "starting julia-avatar"
    );

    let app = AvatarApp::new(config);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = app.run(&args.identifiers, &mut out)?;
    out.flush()?;

    if !written.is_empty() {
        tracing::info!("Wrote {} avatar(s)", written.len());
    }
    Ok(())
}
