//! Rendering seam between the controller and whatever draws the panel.

use chrono::{DateTime, Utc};
use zonectl_core::display::{ButtonView, ProgressBar};

/// The widgets the controller drives: a status line, a progress bar,
/// the start/stop button and a blocking alert.
pub trait PanelView: Send {
    fn set_status_text(&mut self, text: &str);

    fn set_progress(&mut self, progress: ProgressBar);

    /// Replace the button's label, style and enabled state.
    fn set_button(&mut self, button: &ButtonView);

    /// Toggle only the enabled state, leaving label and style as they are.
    fn set_button_enabled(&mut self, enabled: bool);

    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Called after each applied status payload.
    fn set_last_update(&mut self, _at: DateTime<Utc>) {}

    /// Called once a batch of updates is complete.
    fn present(&mut self) {}
}
