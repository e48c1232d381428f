//! Tracing bootstrap.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; the default keeps the
/// server's own crates at `level` and everything else at `warn`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,meeplelog={level},meeplelog_server={level},meeplelog_auth={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
