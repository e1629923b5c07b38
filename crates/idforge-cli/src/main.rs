//! # `idforge`
//!
//! Prints identifiers from one of the `idforge` strategies, one per line.
//!
//! ```bash
//! idforge --strategy flake --worker-id 7 -n 5
//! IDFORGE_STRATEGY=sortable IDFORGE_FORMAT=simple idforge -n 3
//! ```

mod config;
mod telemetry;

use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, CliConfig};
use idforge::IdentityGenerator;
use telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_tracing();

    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    }

    let generator = config
        .generator
        .build()
        .context("failed to build identifier generator")?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..config.count {
        let id = generator
            .try_generate()
            .context("failed to generate identifier")?;
        writeln!(out, "{}", config.format.render(id))?;
    }
    out.flush()?;

    tracing::debug!(count = config.count, "done");
    Ok(())
}
