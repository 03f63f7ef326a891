use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. Calling this twice is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
