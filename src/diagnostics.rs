//! Internal diagnostics
//!
//! redlog's own debug output (relay start/stop, setup problems) goes
//! through `tracing`, never through a redlog logger.

/// Initialize internal tracing for redlog debug output
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output. Output goes to stderr so
/// it never mixes with log lines on stdout.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
