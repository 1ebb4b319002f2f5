use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Reads the filter from `LESSON_LOG` and falls back to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LESSON_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
