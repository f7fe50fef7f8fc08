use std::net::SocketAddr;

use error_location::ErrorLocation;
use thiserror::Error;

/// Command pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Every port in the scanned range already has an active UDP listener.
    #[error("No free UDP port in range {start}..{end} {location}")]
    NoPortAvailable {
        /// First port of the scanned range.
        start: u16,
        /// One past the last port of the scanned range.
        end: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The operating system's UDP listener table could not be read.
    #[error("Failed to query active UDP listeners: {reason} {location}")]
    PortQueryFailed {
        /// Description of the query failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Binding the allocated port failed, usually because another process won the race.
    #[error("Failed to bind UDP socket on {address}: {source} {location}")]
    BindFailed {
        /// Address the bind was attempted on.
        address: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The receive loop hit a socket error and stopped.
    #[error("UDP receive on port {port} failed: {source} {location}")]
    ReceiveFailed {
        /// Port the listener was bound to.
        port: u16,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `dequeue` was called on an empty channel.
    #[error("Command channel is empty {location}")]
    EmptyChannel {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The receive task panicked or was cancelled before reporting a result.
    #[error("Listener task failed: {reason} {location}")]
    ListenerTaskFailed {
        /// Description of the join failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
