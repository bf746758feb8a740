//! System tray controller for the desknotify daemon.
//!
//! The tray shows an icon with a single "Quit" action. Selecting it ends
//! the whole process immediately.
//!
//! The lifecycle logic lives in [`TrayController`] and is fed through a
//! channel of [`TrayEvent`]s, so it runs the same with or without a GUI:
//! - with the `native` feature, [`native::run`] drives a real tray icon
//! - without it, the caller forwards its own quit triggers (e.g. Ctrl+C)
//!
//! # Platform notes
//! - Linux: GTK / AppIndicator, the GTK main loop runs on the calling thread
//! - Windows and macOS: a `winit` event loop on the main thread
//! - The tray event loop must run on the main thread on some platforms

mod menu;
mod tray;

#[cfg(feature = "native")]
pub mod native;

pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{Terminator, TrayConfig, TrayController, TrayEvent, TrayState};

/// Tooltip used when none is configured.
pub const DEFAULT_TOOLTIP: &str = "desknotify";

/// Errors produced by the tray backend.
#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("icon error: {0}")]
    Icon(String),

    #[error("platform tray error: {0}")]
    Platform(String),
}
