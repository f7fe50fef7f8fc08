//! AnyTray: a tray status indicator driven by UDP text commands.

mod app;
mod app_command;
mod clipboard_handler;
mod config;
mod error;
mod icon_renderer;
mod logging;
mod notifier;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    clipboard_handler::ClipboardHandler,
    error::{AppError, Result as AppResult},
    tray_command::TrayCommand,
    tray_manager::TrayManager,
};

use crate::{app::send_tray, config::Config};

use std::{sync::Mutex, time::Duration};

use anytray_core::{
    ChannelEvent, CommandChannel, CommandDispatcher, DatagramListener, PortAllocator,
};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, instrument};

const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Application entry point.
fn main() {
    let mut log_guard = logging::init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // Both live on the main thread: the dispatcher owns the TrayManager,
    // and TrayIcon is !Send on all platforms.
    let mut runtime: Option<Runtime> = None;
    let mut dispatcher: Option<CommandDispatcher<TrayManager>> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => match start(&tray_proxy) {
                Ok((rt, d)) => {
                    runtime = Some(rt);
                    dispatcher = Some(d);

                    #[cfg(target_os = "macos")]
                    unsafe {
                        use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                        CFRunLoopWakeUp(CFRunLoopGetMain());
                    }
                }
                Err(e) => {
                    error!(error = ?e, "Start-up failed");
                    if let Err(notify_err) = notifier::show_startup_failure(&e) {
                        error!(error = ?notify_err, "Failed to notify operator");
                    }
                    // process::exit skips destructors; flush the log file first.
                    drop(log_guard.take());
                    std::process::exit(1);
                }
            },
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::DrainCommands => {
                    if let Some(d) = dispatcher.as_mut() {
                        d.drain();
                    }
                }
                TrayCommand::ListenerStopped => {
                    if let Some(d) = dispatcher.as_mut() {
                        if let Err(e) = d.renderer_mut().show_not_listening() {
                            error!(error = ?e, "Failed to update tray tooltip");
                        }
                    }
                }
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::LoopDestroyed => {
                // Remove the tray icon before the runtime goes away.
                drop(dispatcher.take());
                if let Some(rt) = runtime.take() {
                    rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
                }
                info!("Event loop destroyed");
                drop(log_guard.take());
            }
            _ => {}
        }
    });
}

/// Allocate a port, start listening, build the tray and wire the dispatcher.
///
/// Any error here is fatal: nothing is left bound or shown when it returns `Err`.
#[instrument(skip(tray_proxy))]
fn start(
    tray_proxy: &EventLoopProxy<TrayCommand>,
) -> AppResult<(Runtime, CommandDispatcher<TrayManager>)> {
    let config = Config::load()?;
    config.validate()?;

    let port = PortAllocator::system().allocate(config.listener.range())?;

    let channel = CommandChannel::new();

    // Enqueue notifications fire on a runtime worker; hand the drain to the UI thread.
    let wake_proxy = Mutex::new(tray_proxy.clone());
    channel.subscribe(move |event| {
        if event != ChannelEvent::Enqueued {
            return;
        }
        let proxy = wake_proxy.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = send_tray(&proxy, TrayCommand::DrainCommands) {
            debug!(error = ?e, "UI thread gone, dropping wake-up");
        }
    });

    let runtime = Runtime::new()?;
    let listener = runtime.block_on(DatagramListener::start(
        config.listener.bind_address,
        port,
        channel.clone(),
    ))?;

    let tray_manager = TrayManager::new(listener.port(), &config.indicator)?;
    let menu_ids = tray_manager.menu_ids().clone();

    let dispatcher = CommandDispatcher::new(
        channel,
        config.indicator.recognized(),
        tray_manager,
        config.indicator.initial(),
    );

    let app = App {
        listener,
        tray_proxy: tray_proxy.clone(),
        menu_ids,
        clipboard: None,
    };

    runtime.spawn(async move {
        if let Err(e) = app.run().await {
            error!(error = ?e, "App error");
        }
    });

    Ok((runtime, dispatcher))
}
