use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "lightbox=info";

/// Installs the fmt subscriber, filtered by `RUST_LOG` when set. Safe to call
/// more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
