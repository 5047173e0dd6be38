//! Tracing setup for the binary. Library crates only emit events.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prefix match, so this also covers cellgrid_core and cellgrid_engine.
const DEFAULT_FILTER: &str = "cellgrid=info";

/// Install a stderr subscriber filtered by `RUST_LOG` (default
/// `cellgrid=info`). Returns false if a subscriber was already set.
pub fn init() -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .is_ok()
}
