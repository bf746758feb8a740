//! Platform tray icon backed by `tray-icon`.
//!
//! [`run`] takes over the calling thread (which must be the main thread)
//! and only returns if the controller terminates without exiting the
//! process, or if the platform loop ends on its own.

use std::path::Path;
use std::time::Duration;

use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem as NativeMenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::TrayError;
use crate::menu::MenuAction;
use crate::tray::{TrayController, TrayState};

/// How often queued controller events are checked while the loop is idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maps native menu item IDs to menu actions.
struct MenuBindings {
    actions: Vec<(MenuId, MenuAction)>,
}

impl MenuBindings {
    fn action_for(&self, id: &MenuId) -> Option<MenuAction> {
        self.actions
            .iter()
            .find(|(item_id, _)| item_id == id)
            .map(|(_, action)| *action)
    }
}

/// Applies pending menu clicks and queued controller events.
fn pump(controller: &mut TrayController, bindings: &MenuBindings) -> TrayState {
    while let Ok(event) = MenuEvent::receiver().try_recv() {
        if let Some(action) = bindings.action_for(&event.id) {
            if controller.handle_action(action) == TrayState::Terminated {
                return TrayState::Terminated;
            }
        }
    }
    controller.poll()
}

/// Builds the native menu from the controller's menu model.
fn build_menu(controller: &TrayController) -> Result<(Menu, MenuBindings), TrayError> {
    let menu = Menu::new();
    let mut actions = Vec::new();

    for item in controller.menu().build_menu() {
        if item.is_separator() {
            menu.append(&PredefinedMenuItem::separator())
                .map_err(|e| TrayError::Platform(e.to_string()))?;
            continue;
        }

        let native = NativeMenuItem::new(&item.label, item.enabled, None);
        if let Some(action) = item.action {
            actions.push((native.id().clone(), action));
        }
        menu.append(&native)
            .map_err(|e| TrayError::Platform(e.to_string()))?;
    }

    Ok((menu, MenuBindings { actions }))
}

/// Decodes an image file into a tray icon.
pub fn load_icon(path: &Path) -> Result<Icon, TrayError> {
    let image = image::open(path)
        .map_err(|e| TrayError::Icon(format!("{}: {e}", path.display())))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).map_err(|e| TrayError::Icon(e.to_string()))
}

/// Creates the tray icon. A missing or unreadable icon file is logged and
/// the tray is shown without an image.
fn build_tray(controller: &TrayController) -> Result<(TrayIcon, MenuBindings), TrayError> {
    let (menu, bindings) = build_menu(controller)?;
    let config = controller.config();

    let mut builder = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(&config.tooltip);

    if let Some(path) = &config.icon_path {
        match load_icon(path) {
            Ok(icon) => builder = builder.with_icon(icon),
            Err(e) => tracing::warn!("tray icon unavailable: {e}"),
        }
    }

    let tray = builder
        .build()
        .map_err(|e| TrayError::Platform(format!("failed to create tray icon: {e}")))?;
    tracing::debug!("tray icon created");
    Ok((tray, bindings))
}

/// Shows the tray icon and runs the GTK main loop.
#[cfg(target_os = "linux")]
pub fn run(mut controller: TrayController) -> Result<TrayState, TrayError> {
    use gtk::glib;

    gtk::init().map_err(|e| TrayError::Platform(format!("failed to initialize GTK: {e}")))?;

    let (_tray, bindings) = build_tray(&controller)?;
    let state = std::rc::Rc::new(std::cell::Cell::new(controller.state()));
    let final_state = std::rc::Rc::clone(&state);

    glib::timeout_add_local(POLL_INTERVAL, move || {
        let current = pump(&mut controller, &bindings);
        state.set(current);
        if current == TrayState::Terminated {
            gtk::main_quit();
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });

    tracing::info!("tray icon running");
    gtk::main();
    Ok(final_state.get())
}

/// Shows the tray icon and runs a `winit` event loop.
#[cfg(not(target_os = "linux"))]
pub fn run(mut controller: TrayController) -> Result<TrayState, TrayError> {
    use winit::event::{Event, StartCause};
    use winit::event_loop::{ControlFlow, EventLoop};

    let event_loop = EventLoop::new()
        .map_err(|e| TrayError::Platform(format!("failed to create event loop: {e}")))?;

    let mut tray: Option<(TrayIcon, MenuBindings)> = None;
    let mut state = controller.state();

    #[allow(deprecated)]
    event_loop
        .run(|event, event_loop| {
            event_loop.set_control_flow(ControlFlow::wait_duration(POLL_INTERVAL));

            match event {
                // macOS requires the icon to be created once the loop is up.
                Event::NewEvents(StartCause::Init) => match build_tray(&controller) {
                    Ok(built) => {
                        tracing::info!("tray icon running");
                        tray = Some(built);
                    }
                    Err(e) => tracing::error!("failed to show tray icon: {e}"),
                },
                Event::AboutToWait => {
                    state = match &tray {
                        Some((_, bindings)) => pump(&mut controller, bindings),
                        None => controller.poll(),
                    };
                    if state == TrayState::Terminated {
                        event_loop.exit();
                    }
                }
                _ => {}
            }
        })
        .map_err(|e| TrayError::Platform(format!("event loop error: {e}")))?;

    Ok(state)
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;

    #[test]
    fn quit_id_maps_to_quit_action() {
        let bindings = MenuBindings {
            actions: vec![(MenuId::new("quit"), MenuAction::Quit)],
        };

        assert_eq!(bindings.action_for(&MenuId::new("quit")), Some(MenuAction::Quit));
        assert_eq!(bindings.action_for(&MenuId::new("status")), None);
    }
}
