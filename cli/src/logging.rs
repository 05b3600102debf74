//! Logging setup for the interactive shell.
//!
//! Writes to stderr so log lines do not interleave with command output.
//! Set `DEBUG_LOGGING=1` (or `debug_logging = true` in the config) to enable
//! debug output for the trigger crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init(debug_from_config: bool) {
    let debug_logging = debug_from_config || std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        "info,trigger_core=debug,trigger_cli=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(filter_directive))
        .init();

    tracing::debug!(debug_logging, "logging initialized");
}
