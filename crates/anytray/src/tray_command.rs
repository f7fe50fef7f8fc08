/// Commands sent from other threads to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`) and the
/// dispatcher that renders into it, so queue drains, tray mutations and
/// process lifecycle events all flow through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Commands were enqueued; drain them into the indicator.
    DrainCommands,
    /// The UDP receive loop ended; show that no more commands will arrive.
    ListenerStopped,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
