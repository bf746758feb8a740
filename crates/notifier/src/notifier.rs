use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{Backend, DesktopBackend};
use crate::notification::Notification;

/// Best-effort notification front end.
///
/// Cloning is cheap; every clone shares the same backend.
#[derive(Clone)]
pub struct Notifier {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    /// Creates a notifier on top of an arbitrary backend.
    pub fn new(backend: impl Backend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a notifier that shows native desktop toasts with `icon`.
    pub fn desktop(icon: Option<PathBuf>) -> Self {
        Self::new(DesktopBackend::new(icon))
    }

    /// Shows a notification on the calling thread.
    ///
    /// Platform errors are logged and dropped.
    pub fn notify(&self, title: &str, body: &str) {
        let notification = Notification::new(title, body);
        match self.backend.show(&notification) {
            Ok(()) => tracing::debug!(%title, %body, "notification shown"),
            Err(e) => tracing::error!(%title, "error showing notification: {e}"),
        }
    }

    /// Shows `notification` on a fresh background task and returns at once.
    ///
    /// The task is detached: it is never joined and cannot be cancelled.
    /// Inside a tokio runtime it runs on the blocking pool, otherwise on a
    /// dedicated OS thread.
    pub fn dispatch(&self, notification: Notification) {
        let notifier = self.clone();
        let job = move || notifier.notify(&notification.title, &notification.body);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                drop(handle.spawn_blocking(job));
            }
            Err(_) => {
                if let Err(e) = std::thread::Builder::new()
                    .name("desknotify-dispatch".into())
                    .spawn(job)
                {
                    tracing::error!("failed to spawn notification thread: {e}");
                }
            }
        }
    }
}
