use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Initialize tracing.
///
/// `RUST_LOG` wins when set; otherwise `level` (from config) applies to
/// everything, falling back to `info`.
pub fn init(level: Option<&str>) {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
