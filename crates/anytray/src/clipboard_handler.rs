//! Clipboard integration for the "Copy port" menu action.

use crate::{AppError, AppResult};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Clipboard writer.
pub struct ClipboardHandler {
    pub(crate) clipboard: Clipboard,
}

impl ClipboardHandler {
    /// Open the system clipboard.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { clipboard })
    }

    /// Replace the clipboard contents with `text`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn copy_text(&mut self, text: &str) -> AppResult<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(text_len = text.len(), "Text copied to clipboard");

        Ok(())
    }
}
