//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::common::config::{LedgerConfig, LogFormat};

/// Installs the global subscriber, writing to stderr so stdout stays free for output.
///
/// `RUST_LOG` wins over the configured filter. Safe to call more than once; later calls
/// are no-ops.
pub fn init(config: &LedgerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
