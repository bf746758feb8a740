//! Desktop notifications for the desknotify daemon.
//!
//! A [`Notifier`] wraps a [`Backend`] (the OS toast mechanism, see
//! [`DesktopBackend`]) and offers two entry points:
//! - [`Notifier::notify`] shows a notification synchronously, logging and
//!   discarding any platform error
//! - [`Notifier::dispatch`] does the same on a fresh background task and
//!   returns immediately
//!
//! Delivery is best-effort. Callers never learn whether a notification was
//! actually displayed.

mod backend;
mod notification;
mod notifier;

pub use backend::{APP_NAME, Backend, DesktopBackend};
pub use notification::Notification;
pub use notifier::Notifier;

/// Errors produced by a notification backend.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("platform notification error: {0}")]
    Platform(String),

    #[error("notifications are not supported on this platform")]
    Unsupported,
}
