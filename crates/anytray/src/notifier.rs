//! Desktop notifications: the port announcement and start-up failures.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notify_rust::Notification;
use tracing::instrument;

const NOTIFICATION_TITLE: &str = "AnyTray Notifier";

/// Announce the listening port.
#[track_caller]
#[instrument]
pub(crate) fn show_port(port: u16) -> AppResult<()> {
    show(&port_message(port))
}

/// Tell the operator why the process is about to exit.
#[track_caller]
pub(crate) fn show_startup_failure(error: &AppError) -> AppResult<()> {
    show(&startup_failure_message(error))
}

pub(crate) fn port_message(port: u16) -> String {
    format!("Listening on UDP port: {}", port)
}

pub(crate) fn startup_failure_message(error: &AppError) -> String {
    match error {
        AppError::Core {
            source: anytray_core::CoreError::NoPortAvailable { start, end, .. },
            ..
        } => format!(
            "No free UDP ports available between {} and {}. Do you have permission?",
            start,
            end.saturating_sub(1)
        ),
        other => format!("AnyTray could not start: {}", other),
    }
}

#[track_caller]
fn show(body: &str) -> AppResult<()> {
    Notification::new()
        .summary(NOTIFICATION_TITLE)
        .body(body)
        .show()
        .map(|_| ())
        .map_err(|e| AppError::NotificationFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
