use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence over the debug flag. Does nothing when the
/// host program already installed a global subscriber.
pub fn init_tracing(debug: bool) {
    let default_directive = if debug { "progress_log=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
