//! Diagnostics for the `idforge` binary.
//!
//! Identifiers go to stdout; everything logged through `tracing` goes to
//! stderr so the two never mix in a pipeline. Filtering follows `RUST_LOG`
//! and defaults to `info`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .init();
}
