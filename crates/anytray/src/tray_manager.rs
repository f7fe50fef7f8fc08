//! System tray icon driven by the command dispatcher.
//!
//! Shows one icon per configured indicator state and a context menu with
//! the listening port, port copy/notify actions and Exit.

use crate::{
    AppCommand, AppError, AppResult,
    config::IndicatorConfig,
    icon_renderer::{render_icon, to_tray_icon},
};

use std::{collections::HashMap, panic::Location};

use anytray_core::{IndicatorRenderer, IndicatorState};
use error_location::ErrorLocation;
use image::RgbaImage;
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

const TOOLTIP_PREFIX: &str = "AnyTray";

/// Menu item ids, cloned off the UI thread so menu events can be decoded
/// on the async runtime.
#[derive(Debug, Clone)]
pub struct MenuIds {
    pub(crate) copy_port: MenuId,
    pub(crate) show_port: MenuId,
    pub(crate) exit: MenuId,
}

impl MenuIds {
    /// Map a clicked menu item to the action it requests.
    pub fn command_for(&self, id: &MenuId) -> Option<AppCommand> {
        if *id == self.copy_port {
            Some(AppCommand::CopyPort)
        } else if *id == self.show_port {
            Some(AppCommand::ShowPort)
        } else if *id == self.exit {
            Some(AppCommand::Shutdown)
        } else {
            None
        }
    }
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    icons: HashMap<String, RgbaImage>,
    menu_ids: MenuIds,
}

impl TrayManager {
    /// Create the tray icon showing `config`'s initial state.
    ///
    /// Every configured state is rendered up front so a bad style fails
    /// start-up instead of the first command.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn new(port: u16, config: &IndicatorConfig) -> AppResult<Self> {
        let icons = config
            .states
            .iter()
            .map(|style| render_icon(style).map(|img| (style.name.clone(), img)))
            .collect::<AppResult<HashMap<_, _>>>()?;

        let menu = Menu::new();

        let port_item = MenuItem::new(format!("Listening on UDP port {}", port), false, None);
        let copy_item = MenuItem::new("Copy port", true, None);
        let show_item = MenuItem::new("Show port", true, None);
        let exit_item = MenuItem::new("Exit AnyTray", true, None);

        let menu_ids = MenuIds {
            copy_port: copy_item.id().clone(),
            show_port: show_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        menu.append(&port_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add port menu item: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append_items(&[
            &copy_item,
            &show_item,
            &PredefinedMenuItem::separator(),
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to add menu items: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let initial = config.initial();
        let icon = Self::icon_for(&icons, &initial)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(&initial))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(port, initial = %initial, "System tray icon initialized");

        Ok(Self {
            tray_icon,
            icons,
            menu_ids,
        })
    }

    /// Update the tray icon and tooltip to `state`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: &IndicatorState) -> AppResult<()> {
        let icon = Self::icon_for(&self.icons, state)?;

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.set_tooltip(&tooltip(state))
    }

    /// Mark the indicator as no longer receiving commands.
    ///
    /// The icon keeps showing the last state.
    #[track_caller]
    pub fn show_not_listening(&mut self) -> AppResult<()> {
        self.set_tooltip(&format!("{} - not listening", TOOLTIP_PREFIX))
    }

    /// Ids of the actionable menu items.
    pub fn menu_ids(&self) -> &MenuIds {
        &self.menu_ids
    }

    #[track_caller]
    fn set_tooltip(&mut self, text: &str) -> AppResult<()> {
        self.tray_icon
            .set_tooltip(Some(text))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn icon_for(
        icons: &HashMap<String, RgbaImage>,
        state: &IndicatorState,
    ) -> AppResult<tray_icon::Icon> {
        let img = icons.get(state.name()).ok_or_else(|| AppError::TrayError {
            reason: format!("No icon for indicator state {:?}", state.name()),
            location: ErrorLocation::from(Location::caller()),
        })?;

        to_tray_icon(img)
    }
}

impl IndicatorRenderer for TrayManager {
    type Error = AppError;

    fn render(&mut self, state: &IndicatorState) -> AppResult<()> {
        self.update_state(state)?;
        debug!(state = %state, "Tray icon updated");
        Ok(())
    }
}

fn tooltip(state: &IndicatorState) -> String {
    format!("{} - {}", TOOLTIP_PREFIX, state)
}
