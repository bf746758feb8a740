//! desknotify daemon entry point.

mod app;

use desknotify_config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting desknotify"
    );

    // Never fails; falls back to 0.0.0.0:8081.
    let config = Config::load();
    tracing::info!(address = %config.bind_addr(), "configuration loaded");

    // The server lives on the runtime's worker threads, the tray keeps
    // the main thread.
    let rt = tokio::runtime::Runtime::new()?;
    app::run(&rt, config)
}
