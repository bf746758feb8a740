//! Notification backends.

use std::path::PathBuf;

use crate::{Notification, NotifyError};

/// Application name reported to the notification server.
pub const APP_NAME: &str = "desknotify";

/// The seam to the platform notification mechanism.
///
/// Implementations are called from background threads, never from the
/// request handler.
pub trait Backend: Send + Sync + 'static {
    /// Displays `notification`. Blocks until the platform accepted it.
    fn show(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Native desktop toasts via `notify-rust`.
///
/// Linux goes through the freedesktop D-Bus notification service, Windows
/// through WinRT toasts and macOS through the notification center.
#[derive(Debug, Clone, Default)]
pub struct DesktopBackend {
    icon: Option<PathBuf>,
}

impl DesktopBackend {
    /// Creates a backend that attaches `icon` (a local image file) to every
    /// notification.
    pub fn new(icon: Option<PathBuf>) -> Self {
        Self { icon }
    }

    /// Returns the icon attached to notifications, if any.
    pub fn icon(&self) -> Option<&PathBuf> {
        self.icon.as_ref()
    }
}

impl Backend for DesktopBackend {
    #[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos", target_os = "freebsd"))]
    fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut toast = notify_rust::Notification::new();
        toast
            .appname(APP_NAME)
            .summary(&notification.title)
            .body(&notification.body);

        if let Some(icon) = &self.icon {
            let icon = icon.to_string_lossy();
            toast.icon(&icon);

            #[cfg(target_os = "windows")]
            toast.image_path(&icon);
        }

        toast
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Platform(e.to_string()))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos", target_os = "freebsd")))]
    fn show(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported)
    }
}
