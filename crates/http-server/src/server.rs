//! Notification HTTP server.
//!
//! Binds the configured `host:port` and serves [`router`](crate::router)
//! until shut down.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use desknotify_config::Config;
use desknotify_notifier::Notifier;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::ServerError;
use crate::handler::router;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP address to bind.
    pub host: String,
    /// TCP port to listen on (0 = OS-assigned).
    pub port: u16,
}

impl From<&Config> for ServerConfig {
    fn from(config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// The notification HTTP server.
pub struct NotificationServer {
    config: ServerConfig,
    notifier: Notifier,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
    running: AtomicBool,
}

impl NotificationServer {
    /// Creates a new server dispatching accepted requests to `notifier`.
    pub fn new(config: ServerConfig, notifier: Notifier) -> Arc<Self> {
        Arc::new(Self {
            config,
            notifier,
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
            running: AtomicBool::new(false),
        })
    }

    /// Returns the local address the server is listening on.
    ///
    /// Only available after [`run`](Self::run) binds the socket.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Returns the listening port (0 if not yet bound).
    pub async fn port(&self) -> u16 {
        self.local_addr.lock().await.map(|a| a.port()).unwrap_or(0)
    }

    /// Stops accepting connections and lets in-flight requests finish.
    ///
    /// The daemon itself never calls this: quitting from the tray ends the
    /// process directly.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Binds the configured address and serves until [`shutdown`](Self::shutdown).
    pub async fn run(self: &Arc<Self>) -> Result<(), ServerError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ServerError::AlreadyRunning);
        }

        let result = self.serve().await;
        self.running.store(false, Ordering::SeqCst);
        result
    }

    async fn serve(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;

        let local_addr = listener.local_addr()?;
        *self.local_addr.lock().await = Some(local_addr);
        tracing::info!("notification server listening on {local_addr}");

        let cancel = self.cancel.clone();
        axum::serve(listener, router(self.notifier.clone()))
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await?;

        *self.local_addr.lock().await = None;
        tracing::info!("notification server shut down");
        Ok(())
    }
}
