use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map `-v` counts to a level. Zero means "defer to RUST_LOG".
pub fn verbosity_level(verbose: u8) -> Option<Level> {
    match verbose {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    match verbosity_level(verbose) {
        Some(level) => EnvFilter::new(format!("oraqb={level},oraqb_cli={level}")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn setup_logging(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .compact()
        .try_init();
}
