//! Diagnostic logging setup
//!
//! Events go to stderr so they never mix with report output on stdout. The
//! default filter only shows warnings and errors; set `RUST_LOG` (for example
//! `RUST_LOG=tabstat_summary=debug`) for more detail.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_FILTER: &str = "warn";

pub(crate) fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
