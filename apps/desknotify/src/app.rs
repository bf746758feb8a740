//! Application orchestrator: wires the daemon components together.

use std::sync::Arc;
use std::sync::mpsc;

use desknotify_config::{Config, asset_path};
use desknotify_http_server::{NotificationServer, ServerConfig};
use desknotify_notifier::Notifier;
use desknotify_tray::{TrayConfig, TrayController, TrayEvent};
use tokio::runtime::{Handle, Runtime};

/// Image attached to notifications.
const NOTIFICATION_ICON: &str = "appicon.png";

/// Image shown in the system tray.
#[cfg(target_os = "windows")]
const TRAY_ICON: &str = "appicon.ico";
#[cfg(not(target_os = "windows"))]
const TRAY_ICON: &str = "appicon.png";

/// Runs the daemon until the user quits from the tray.
pub fn run(runtime: &Runtime, config: Config) -> anyhow::Result<()> {
    // -- HTTP server --
    let notifier = Notifier::desktop(Some(asset_path(NOTIFICATION_ICON)));
    let _server = start_server(runtime.handle(), &config, notifier);

    // -- Tray --
    let (controller, event_tx) = TrayController::new(tray_config(&config));
    forward_ctrl_c(runtime.handle(), event_tx);

    tracing::info!("starting system tray application");
    drive_tray(controller)
}

/// Spawns the HTTP server on the runtime. Bind failures are logged; the
/// tray keeps running so the user can still quit.
pub fn start_server(
    runtime: &Handle,
    config: &Config,
    notifier: Notifier,
) -> Arc<NotificationServer> {
    tracing::info!(address = %config.bind_addr(), "starting notification server");

    let server = NotificationServer::new(ServerConfig::from(config), notifier);
    let server_run = Arc::clone(&server);
    runtime.spawn(async move {
        if let Err(e) = server_run.run().await {
            tracing::error!("server error: {e}");
        }
    });
    server
}

/// Tray settings derived from the effective configuration.
pub fn tray_config(config: &Config) -> TrayConfig {
    TrayConfig {
        address: config.bind_addr(),
        icon_path: Some(asset_path(TRAY_ICON)),
        ..TrayConfig::default()
    }
}

/// Turns Ctrl+C into a quit request.
fn forward_ctrl_c(runtime: &Handle, event_tx: mpsc::Sender<TrayEvent>) {
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("SIGINT received, quitting");
                let _ = event_tx.send(TrayEvent::QuitRequested);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C: {e}");
                // Keep the sender alive so the tray loop does not end.
                let _keep = event_tx;
                std::future::pending::<()>().await;
            }
        }
    });
}

#[cfg(feature = "native-tray")]
fn drive_tray(controller: TrayController) -> anyhow::Result<()> {
    let state = desknotify_tray::native::run(controller)?;
    tracing::debug!(?state, "tray loop ended");
    Ok(())
}

#[cfg(not(feature = "native-tray"))]
fn drive_tray(controller: TrayController) -> anyhow::Result<()> {
    tracing::info!("no tray icon in this build, press Ctrl+C to quit");
    let state = controller.run();
    tracing::debug!(?state, "tray loop ended");
    Ok(())
}
