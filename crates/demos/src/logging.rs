//! Structured logging setup for demos
//!
//! Every demo run logs a session header carrying the store settings and the
//! script it executes, so runs with different timings can be compared.

use std::sync::Once;

use name_store::StoreConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "name_store=info,demos=info,names_demo=info";

/// Initialize tracing and log the session header
///
/// Output is compact and colored, filtered from RUST_LOG. Only the first call
/// installs the subscriber; each call logs its own header.
pub fn init_tracing_for_session(script: &str, config: &StoreConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(true).compact().with_target(false))
            .init();
    });

    tracing::info!(
        script,
        debounce_ms = config.debounce.as_millis() as u64,
        clear_interval_ms = config.clear_interval.as_millis() as u64,
        bad_pattern = %config.bad_pattern,
        "=== names-demo session ==="
    );
}
