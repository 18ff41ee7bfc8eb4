use tracing_subscriber::EnvFilter;

/// stdout is the IPC channel, so all diagnostics go to stderr.
pub fn init() {
    let filter = EnvFilter::try_from_env("ATTENDANCED_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
