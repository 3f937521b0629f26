//! Panel state machine.
//!
//! [`PanelState`] owns the two flags the panel tracks (`running` and the
//! selected duration) plus whether the start/stop button currently accepts
//! clicks. All transitions are pure; the client crate performs the
//! network calls and forwards the returned display values to a view.

use chrono::{DateTime, Utc};

use crate::display::{
    ButtonStyle, ButtonView, ProgressBar, LABEL_START, LABEL_STOP, TEXT_INITIALIZING, TEXT_OFF,
};
use crate::status::{JobStatus, StatusPayload};

/// Coarse phase derived from `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
}

/// Status text and progress bar produced by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDisplay {
    pub text: String,
    pub progress: ProgressBar,
}

#[derive(Debug, Clone, Default)]
pub struct PanelState {
    running: bool,
    selected_hours: Option<u32>,
    button_enabled: bool,
    last_update: Option<DateTime<Utc>>,
}

/// Render the start/stop button from the two inputs it depends on.
pub fn button_view(running: bool, hours_selected: bool) -> ButtonView {
    if running {
        ButtonView {
            label: LABEL_STOP,
            style: ButtonStyle::Danger,
            enabled: true,
        }
    } else {
        ButtonView {
            label: LABEL_START,
            style: ButtonStyle::Primary,
            enabled: hours_selected,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    pub fn selected_hours(&self) -> Option<u32> {
        self.selected_hours
    }

    /// Hours sent with a start request. Zero when nothing was selected.
    pub fn hours_for_start(&self) -> u32 {
        self.selected_hours.unwrap_or(0)
    }

    pub fn button_enabled(&self) -> bool {
        self.button_enabled
    }

    /// When the last status payload was applied.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Recompute the button from `running` and record its enabled state.
    pub fn render_button(&mut self) -> ButtonView {
        let view = button_view(self.running, self.selected_hours.is_some());
        self.button_enabled = view.enabled;
        view
    }

    /// Apply a status payload received at `now`.
    ///
    /// The caller re-renders the button afterwards.
    pub fn apply_status(&mut self, payload: &StatusPayload, now: DateTime<Utc>) -> StatusDisplay {
        self.last_update = Some(now);

        match payload.job_status() {
            JobStatus::Running => {
                self.running = true;
                StatusDisplay {
                    text: payload.message.clone(),
                    progress: ProgressBar::determinate(payload.percent),
                }
            }
            JobStatus::Off => {
                self.running = false;
                StatusDisplay {
                    text: TEXT_OFF.to_string(),
                    progress: ProgressBar::empty(),
                }
            }
            JobStatus::Other(_) => {
                self.running = true;
                StatusDisplay {
                    text: payload.message.clone(),
                    progress: ProgressBar::indeterminate(100.0),
                }
            }
        }
    }

    /// Optimistic transition after the server accepted a start request.
    ///
    /// The button stays disabled until the next status refresh re-renders
    /// it, so a second click cannot issue another start.
    pub fn begin_start(&mut self) -> StatusDisplay {
        self.running = true;
        self.button_enabled = false;
        StatusDisplay {
            text: TEXT_INITIALIZING.to_string(),
            progress: ProgressBar::indeterminate(0.0),
        }
    }

    /// Record a duration choice. Enables the button even while running;
    /// the value only matters for the next start.
    pub fn select_hours(&mut self, hours: u32) {
        self.selected_hours = Some(hours);
        self.button_enabled = true;
    }
}
