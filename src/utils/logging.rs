//! Structured logging configuration.
//!
//! The library itself only emits `tracing` events; binaries and test
//! harnesses that want them printed call [`init`] once at startup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber at INFO, honoring `RUST_LOG` overrides.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Installs a formatting subscriber with `level` as the default filter.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
