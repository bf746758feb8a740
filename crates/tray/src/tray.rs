//! Tray controller, events, and configuration.
//!
//! The controller owns the process lifetime. It starts in
//! [`TrayState::Running`]; a [`TrayEvent::QuitRequested`] moves it to
//! [`TrayState::Terminated`] and invokes the terminate primitive on the
//! calling thread. With the default primitive the process exits right
//! there: the HTTP server is not drained and pending notification
//! dispatches are abandoned.
//!
//! The controller is independent of the GUI backend. Backends (see the
//! `native` feature) and signal handlers feed it events through the
//! channel returned by [`TrayController::new`].

use std::path::PathBuf;
use std::sync::mpsc;

use crate::menu::{MenuAction, MenuState};

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Tooltip shown when hovering the icon.
    pub tooltip: String,
    /// Bind address displayed in the menu header.
    pub address: String,
    /// Optional icon image file.
    pub icon_path: Option<PathBuf>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tooltip: crate::DEFAULT_TOOLTIP.into(),
            address: String::new(),
            icon_path: None,
        }
    }
}

/// Events delivered to the tray controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Quit" in the context menu (or the process was
    /// interrupted in headless mode).
    QuitRequested,
}

impl From<MenuAction> for TrayEvent {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Quit => TrayEvent::QuitRequested,
        }
    }
}

/// Lifecycle state of the tray controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayState {
    Running,
    /// Absorbing: no event leaves this state.
    Terminated,
}

/// Invoked once on the Running → Terminated transition.
pub type Terminator = Box<dyn FnMut() + Send>;

/// Process-lifetime controller driven by tray events.
pub struct TrayController {
    config: TrayConfig,
    menu: MenuState,
    state: TrayState,
    event_rx: mpsc::Receiver<TrayEvent>,
    terminate: Terminator,
}

impl TrayController {
    /// Creates a controller whose quit action exits the process.
    ///
    /// Returns `(controller, event_sender)`. The sender can be cloned and
    /// handed to any thread that needs to request termination.
    pub fn new(config: TrayConfig) -> (Self, mpsc::Sender<TrayEvent>) {
        Self::with_terminator(config, terminate_process)
    }

    /// Creates a controller with a custom terminate primitive.
    pub fn with_terminator(
        config: TrayConfig,
        terminate: impl FnMut() + Send + 'static,
    ) -> (Self, mpsc::Sender<TrayEvent>) {
        let (event_tx, event_rx) = mpsc::channel();

        let controller = Self {
            menu: MenuState {
                tooltip: config.tooltip.clone(),
                address: config.address.clone(),
            },
            config,
            state: TrayState::Running,
            event_rx,
            terminate: Box::new(terminate),
        };

        (controller, event_tx)
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> TrayState {
        self.state
    }

    /// Returns the tray configuration.
    pub fn config(&self) -> &TrayConfig {
        &self.config
    }

    /// Returns the menu model.
    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    /// Applies an event and returns the resulting state.
    pub fn handle_event(&mut self, event: TrayEvent) -> TrayState {
        match (self.state, event) {
            (TrayState::Running, TrayEvent::QuitRequested) => {
                tracing::info!("exiting application");
                self.state = TrayState::Terminated;
                (self.terminate)();
            }
            (TrayState::Terminated, _) => {
                tracing::debug!(?event, "ignoring event after termination");
            }
        }
        self.state
    }

    /// Applies the event bound to a menu action.
    pub fn handle_action(&mut self, action: MenuAction) -> TrayState {
        self.handle_event(action.into())
    }

    /// Drains queued events without blocking.
    pub fn poll(&mut self) -> TrayState {
        while self.state == TrayState::Running {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                }
                Err(_) => break,
            }
        }
        self.state
    }

    /// Blocks the calling thread, applying events as they arrive.
    ///
    /// Returns once terminated (only reachable with a terminate primitive
    /// that returns) or when every event sender has been dropped.
    pub fn run(mut self) -> TrayState {
        tracing::info!("tray controller running");
        while self.state == TrayState::Running {
            match self.event_rx.recv() {
                Ok(event) => {
                    self.handle_event(event);
                }
                Err(_) => {
                    tracing::debug!("all tray event senders dropped");
                    break;
                }
            }
        }
        self.state
    }
}

/// Ends the whole process immediately, skipping destructors and any
/// in-flight work on other threads.
fn terminate_process() {
    std::process::exit(0);
}
