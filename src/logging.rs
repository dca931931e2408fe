//! Tracing subscriber setup

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.format.eq_ignore_ascii_case("pretty") {
        builder.pretty().try_init()
    } else {
        builder.json().with_current_span(false).try_init()
    };

    if let Err(e) = result {
        // Only happens when a subscriber is already installed (tests)
        eprintln!("tracing subscriber not installed: {}", e);
    }
}
