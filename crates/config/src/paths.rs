//! Paths relative to the installation directory.

use std::path::PathBuf;

/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the directory containing the running executable.
///
/// Falls back to the current working directory when the executable path
/// cannot be resolved.
pub fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the fixed configuration file path.
pub fn config_path() -> PathBuf {
    install_dir().join(CONFIG_FILE_NAME)
}

/// Returns the path of a bundled asset (icons) shipped next to the executable.
pub fn asset_path(name: &str) -> PathBuf {
    install_dir().join(name)
}
