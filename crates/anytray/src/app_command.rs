/// Actions requested from the tray menu, handled on the async runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Copy the listening port to the clipboard.
    CopyPort,
    /// Announce the listening port in a desktop notification.
    ShowPort,
    /// Stop listening and exit.
    Shutdown,
}
