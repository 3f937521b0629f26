#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use zonectl_client::api::{ApiError, JobApi};
use zonectl_client::view::PanelView;
use zonectl_core::display::{ButtonView, ProgressBar};
use zonectl_core::status::StatusPayload;

/// A request the controller issued against [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    Start(u32),
    Stop,
}

/// In-memory [`JobApi`] that replays scripted responses.
///
/// Status responses are consumed in order; once the script runs out every
/// further poll fails with a 503. Start/stop succeed unless a failure
/// status has been set.
#[derive(Default)]
pub struct ScriptedApi {
    statuses: Mutex<VecDeque<Result<StatusPayload, u16>>>,
    start_failure: Mutex<Option<u16>>,
    stop_failure: Mutex<Option<u16>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, status: &str, message: &str, percent: f64) {
        self.statuses.lock().unwrap().push_back(Ok(payload(status, message, percent)));
    }

    pub fn push_status_failure(&self, http_status: u16) {
        self.statuses.lock().unwrap().push_back(Err(http_status));
    }

    pub fn fail_start(&self, http_status: u16) {
        *self.start_failure.lock().unwrap() = Some(http_status);
    }

    pub fn fail_stop(&self, http_status: u16) {
        *self.stop_failure.lock().unwrap() = Some(http_status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }
}

fn failure(status: u16) -> ApiError {
    ApiError::Status {
        status,
        body: "scripted failure".to_string(),
    }
}

#[async_trait]
impl JobApi for ScriptedApi {
    async fn status(&self) -> Result<StatusPayload, ApiError> {
        self.calls.lock().unwrap().push(Call::Status);
        match self.statuses.lock().unwrap().pop_front() {
            Some(Ok(payload)) => Ok(payload),
            Some(Err(status)) => Err(failure(status)),
            None => Err(failure(503)),
        }
    }

    async fn start(&self, hours: u32) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call::Start(hours));
        match *self.start_failure.lock().unwrap() {
            Some(status) => Err(failure(status)),
            None => Ok(()),
        }
    }

    async fn stop(&self) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call::Stop);
        match *self.stop_failure.lock().unwrap() {
            Some(status) => Err(failure(status)),
            None => Ok(()),
        }
    }
}

pub fn payload(status: &str, message: &str, percent: f64) -> StatusPayload {
    StatusPayload {
        status: status.to_string(),
        message: message.to_string(),
        percent,
    }
}

/// Everything a [`RecordingView`] was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    StatusText(String),
    Progress(ProgressBar),
    Button(ButtonView),
    ButtonEnabled(bool),
    Alert(String),
}

/// [`PanelView`] that keeps the current widget state plus a log of calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub status_text: String,
    pub progress: Option<ProgressBar>,
    pub button_label: Option<&'static str>,
    pub button: Option<ButtonView>,
    pub button_enabled: bool,
    pub alerts: Vec<String>,
    pub events: Vec<ViewEvent>,
    pub updates: usize,
}

impl PanelView for RecordingView {
    fn set_status_text(&mut self, text: &str) {
        self.status_text = text.to_string();
        self.events.push(ViewEvent::StatusText(text.to_string()));
    }

    fn set_progress(&mut self, progress: ProgressBar) {
        self.progress = Some(progress);
        self.events.push(ViewEvent::Progress(progress));
    }

    fn set_button(&mut self, button: &ButtonView) {
        self.button_label = Some(button.label);
        self.button = Some(button.clone());
        self.button_enabled = button.enabled;
        self.events.push(ViewEvent::Button(button.clone()));
    }

    fn set_button_enabled(&mut self, enabled: bool) {
        self.button_enabled = enabled;
        self.events.push(ViewEvent::ButtonEnabled(enabled));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
        self.events.push(ViewEvent::Alert(message.to_string()));
    }

    fn set_last_update(&mut self, _at: chrono::DateTime<chrono::Utc>) {
        self.updates += 1;
    }
}
