//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::EnvFilter;

use crate::LoggingConfig;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set. Calling this twice
/// is harmless: the second install fails and is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
