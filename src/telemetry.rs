use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    parse_filter(std::env::var("RUST_LOG").ok().as_deref())
}

/// Falls back to `info` when the directives are missing or invalid.
pub fn parse_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global fmt subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init();
}
