//! Context menu model for the system tray.

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// User requested to quit the application.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn info(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
            action: None,
        }
    }

    fn separator() -> Self {
        Self::info(String::new())
    }

    /// Whether this item renders as a separator.
    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// State used to build the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Tooltip / application display name.
    pub tooltip: String,
    /// Address the HTTP server was configured with.
    pub address: String,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            tooltip: crate::DEFAULT_TOOLTIP.into(),
            address: String::new(),
        }
    }
}

impl MenuState {
    /// Builds the menu: a status line, a separator and the quit entry.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let header = if self.address.is_empty() {
            self.tooltip.clone()
        } else {
            format!("{} ({})", self.tooltip, self.address)
        };

        vec![
            MenuItem::info(header),
            MenuItem::separator(),
            MenuItem {
                label: "Quit".into(),
                enabled: true,
                action: Some(MenuAction::Quit),
            },
        ]
    }
}
