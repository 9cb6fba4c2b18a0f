// 📜 Logging setup
//
// RUST_LOG wins when set; otherwise the configured filter applies.
// Output goes to stderr so stdout stays clean for `lookup --json`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber; later calls are ignored
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
