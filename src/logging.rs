//! Installs the `tracing` subscriber used by the command line.

use tracing_subscriber::{fmt, EnvFilter};

/// Level used when `RUST_LOG` is unset: progress messages by default,
/// more detail with each `-v`, warnings only when quiet.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Log to stderr so SVG or PNG bytes on stdout stay clean. Calling this
/// twice is harmless; the second subscriber is ignored.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
