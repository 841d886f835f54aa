//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Variable holding an explicit tracing filter.
pub const LOG_ENV: &str = "AAC_LOG";

/// Install the stderr subscriber.
///
/// `AAC_LOG` wins when set; otherwise `-v` flags pick the level.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
