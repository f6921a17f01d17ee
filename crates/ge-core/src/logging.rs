//! Structured logging setup.
//!
//! stdout is reserved for command payloads (formatted scalars, JSONL sweep
//! records); all log output goes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for an explicit filter directive.
pub const LOG_ENV: &str = "GE_LOG";

/// Initialize the tracing subscriber.
///
/// Verbosity flags map to levels (`warn` by default, `-v` info, `-vv` debug,
/// `-vvv` trace, `-q` error); an explicit `GE_LOG` directive wins.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
