use crate::{
    AppError,
    notifier::{port_message, startup_failure_message},
};

use std::panic::Location;

use anytray_core::{CoreError, PortRange};
use error_location::ErrorLocation;

/// WHAT: Port notification names the port
/// WHY: The operator reads the port off the notification to configure senders
#[test]
fn given_port_when_formatting_notification_then_port_included() {
    assert_eq!(port_message(1738), "Listening on UDP port: 1738");
}

/// WHAT: Exhausted range explains which ports were tried
/// WHY: The most common start-up failure needs an actionable message
#[test]
fn given_no_port_available_when_formatting_failure_then_range_inclusive() {
    // Given: The default range is exhausted
    let range = PortRange::new(1738, 500);
    let error = AppError::from(CoreError::NoPortAvailable {
        start: range.start(),
        end: range.end(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When: Formatting the failure
    let message = startup_failure_message(&error);

    // Then: Last candidate port is shown, not the exclusive end
    assert_eq!(
        message,
        "No free UDP ports available between 1738 and 2237. Do you have permission?"
    );
}

/// WHAT: Other failures carry the error text
/// WHY: Anything fatal at start-up must reach the operator
#[test]
fn given_config_error_when_formatting_failure_then_reason_included() {
    // Given: A configuration error
    let error = AppError::ConfigError {
        reason: "Duplicate indicator state: \"red\"".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // When: Formatting the failure
    let message = startup_failure_message(&error);

    // Then: The reason is included
    assert!(message.starts_with("AnyTray could not start: "));
    assert!(message.contains("Duplicate indicator state"));
}
