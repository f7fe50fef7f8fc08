use crate::{
    AppCommand, AppError, AppResult, ClipboardHandler, TrayCommand, notifier,
    tray_manager::MenuIds,
};

use std::{ops::ControlFlow, panic::Location};

use anytray_core::DatagramListener;
use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// Async side of the application.
///
/// Runs on the tokio runtime. Owns the UDP listener and reacts to tray menu
/// actions. Anything that touches the tray goes back to the main thread via
/// `tray_proxy` because `TrayIcon` is `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) listener: DatagramListener,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) menu_ids: MenuIds,
    pub(crate) clipboard: Option<ClipboardHandler>,
}

impl App {
    /// Run until Exit is chosen from the tray menu.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(port = self.listener.port(), "AnyTray starting");

        // Menu events are pushed from the UI thread straight into the channel,
        // so no thread sits blocked on the menu receiver during shutdown.
        let (menu_event_tx, mut menu_event_rx) = mpsc::unbounded_channel();
        MenuEvent::set_event_handler(Some(menu_forwarder(menu_event_tx)));

        let mut listening = true;

        loop {
            tokio::select! {
                Some(event) = menu_event_rx.recv() => {
                    let Some(cmd) = self.menu_ids.command_for(&event.id) else {
                        debug!(id = ?event.id, "Ignoring unknown menu event");
                        continue;
                    };

                    let port = self.listener.port();
                    match handle_command(port, &mut self.clipboard, cmd).await {
                        Ok(ControlFlow::Break(())) => {
                            info!("Exit requested from tray menu");
                            break;
                        }
                        Ok(ControlFlow::Continue(())) => {}
                        Err(e) => error!(command = ?cmd, error = ?e, "Failed to handle menu command"),
                    }
                }

                result = self.listener.stopped(), if listening => {
                    listening = false;
                    match result {
                        Ok(()) => warn!("Command listener stopped"),
                        Err(e) => error!(error = ?e, "Command listener failed, indicator will no longer update"),
                    }
                    if let Err(e) = send_tray(&self.tray_proxy, TrayCommand::ListenerStopped) {
                        error!(error = ?e, "Failed to report stopped listener");
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        MenuEvent::set_event_handler(None::<fn(MenuEvent)>);
        drop(menu_event_rx);

        let App {
            listener,
            tray_proxy,
            ..
        } = self;

        if let Err(e) = listener.stop().await {
            error!(error = ?e, "Listener reported an error while stopping");
        }

        send_tray(&tray_proxy, TrayCommand::Shutdown)?;
        info!("AnyTray shut down successfully");

        Ok(())
    }
}

/// Menu event handler that hands each click to the async side.
///
/// Never blocks the UI thread; clicks after the receiver is gone are dropped.
pub(crate) fn menu_forwarder(
    tx: mpsc::UnboundedSender<MenuEvent>,
) -> impl Fn(MenuEvent) + Send + Sync + 'static {
    move |event| {
        if tx.send(event).is_err() {
            debug!("Menu event after shutdown, dropped");
        }
    }
}

/// Carry out one menu action. `Break` means the application should exit.
#[instrument(skip(clipboard))]
pub(crate) async fn handle_command(
    port: u16,
    clipboard: &mut Option<ClipboardHandler>,
    cmd: AppCommand,
) -> AppResult<ControlFlow<()>> {
    match cmd {
        AppCommand::CopyPort => {
            // Kept alive: on X11 the copied text is served by the owning instance.
            if clipboard.is_none() {
                *clipboard = Some(ClipboardHandler::new()?);
            }
            if let Some(clipboard) = clipboard.as_mut() {
                clipboard.copy_text(&port.to_string())?;
                info!(port, "Port copied to clipboard");
            }
        }
        AppCommand::ShowPort => {
            // notify-rust blocks on the session bus.
            tokio::task::spawn_blocking(move || notifier::show_port(port))
                .await
                .map_err(|e| AppError::NotificationFailed {
                    reason: format!("Notification task panicked: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })??;
        }
        AppCommand::Shutdown => return Ok(ControlFlow::Break(())),
    }

    Ok(ControlFlow::Continue(()))
}

#[track_caller]
pub(crate) fn send_tray(proxy: &EventLoopProxy<TrayCommand>, cmd: TrayCommand) -> AppResult<()> {
    proxy
        .send_event(cmd)
        .map_err(|e| AppError::ChannelSendFailed {
            message: format!("Failed to send {:?} to UI thread: {:?}", cmd, e),
            location: ErrorLocation::from(Location::caller()),
        })
}
