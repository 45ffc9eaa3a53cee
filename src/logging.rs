//! Tracing subscriber setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` selects `debug` and the
/// configured level applies. Events go to stderr so stdout stays clean for
/// `--json` output. Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool, config: &Config) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose, config)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn default_filter(verbose: bool, config: &Config) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    let level = config
        .log_level()
        .map_or_else(|_| "warn".to_string(), |level| level.to_string());
    EnvFilter::new(level)
}
