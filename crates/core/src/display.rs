//! Presentation values pushed into a panel view.
//!
//! These are plain data: the view decides how a danger-styled button or
//! a striped progress bar actually looks.

use std::fmt;

/// Button label while a job is active.
pub const LABEL_STOP: &str = "STOP";

/// Button label while idle.
pub const LABEL_START: &str = "Start";

/// Status text shown right after a start request is accepted.
pub const TEXT_INITIALIZING: &str = "Initializing";

/// Status text shown when the server reports no active job.
pub const TEXT_OFF: &str = "OFF";

/// Alert raised when a stop request fails.
pub const ALERT_STOP_FAILED: &str = "Failed to STOP";

/// Alert raised when a start request fails.
pub const ALERT_START_FAILED: &str = "Failed to Start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// Rendered state of the start/stop button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub style: ButtonStyle,
    pub enabled: bool,
}

/// Rendered state of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    /// Filled width, in percent.
    pub percent: f64,
    /// Value announced to assistive tech. Differs from `percent` only for
    /// the post-start placeholder, which fills the bar but reports 0.
    pub value_now: f64,
    /// Striped + animated "busy" rendering.
    pub animated: bool,
}

impl ProgressBar {
    /// A plain bar filled to `percent`.
    pub fn determinate(percent: f64) -> Self {
        Self {
            percent,
            value_now: percent,
            animated: false,
        }
    }

    pub fn empty() -> Self {
        Self::determinate(0.0)
    }

    /// A full-width animated bar used when progress is unknown.
    pub fn indeterminate(value_now: f64) -> Self {
        Self {
            percent: 100.0,
            value_now,
            animated: true,
        }
    }

    /// CSS-style width, e.g. `"42%"`.
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.animated {
            write!(f, "{} (busy)", self.width())
        } else {
            f.write_str(&self.width())
        }
    }
}
