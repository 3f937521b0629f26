//! Status poller and start/stop button controller.
//!
//! [`PanelController`] owns the [`PanelState`] and the view. Network
//! calls run without holding the lock, so a periodic poll and a
//! post-start refresh can overlap; whichever response is applied last
//! wins.

use chrono::Utc;
use tokio::sync::Mutex;
use zonectl_core::display::{ALERT_START_FAILED, ALERT_STOP_FAILED};
use zonectl_core::state::PanelState;
use zonectl_core::status::JobStatus;

use crate::api::{ApiError, JobApi};
use crate::view::PanelView;

/// What a click on the start/stop button ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted a start request.
    Started,
    /// The server accepted a stop request. The job is still considered
    /// running until a poll reports `OFF`.
    StopRequested,
    /// The button was disabled; nothing was sent.
    Ignored,
    StartFailed,
    StopFailed,
}

struct Inner<V> {
    state: PanelState,
    view: V,
}

pub struct PanelController<A, V> {
    api: A,
    inner: Mutex<Inner<V>>,
}

impl<A, V> PanelController<A, V>
where
    A: JobApi,
    V: PanelView,
{
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                state: PanelState::new(),
                view,
            }),
        }
    }

    /// Copy of the current state.
    pub async fn state(&self) -> PanelState {
        self.inner.lock().await.state.clone()
    }

    /// Run `f` against the view, e.g. to flush or inspect it.
    pub async fn with_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.inner.lock().await.view)
    }

    /// Re-render the start/stop button from the current state.
    pub async fn render_button_state(&self) {
        let mut inner = self.inner.lock().await;
        render_button(&mut inner);
        inner.view.present();
    }

    /// Fetch `/status` and push the result into the view.
    ///
    /// On error nothing is changed; the caller decides whether to log it.
    pub async fn refresh_status(&self) -> Result<JobStatus, ApiError> {
        let payload = self.api.status().await?;
        let now = Utc::now();

        let mut inner = self.inner.lock().await;
        let display = inner.state.apply_status(&payload, now);
        inner.view.set_status_text(&display.text);
        inner.view.set_progress(display.progress);
        inner.view.set_last_update(now);
        render_button(&mut inner);
        inner.view.present();

        let status = payload.job_status();
        tracing::debug!(
            status = %payload.status,
            percent = payload.percent,
            running = inner.state.running(),
            "Applied job status",
        );
        Ok(status)
    }

    /// Handle a click on the start/stop button.
    pub async fn toggle_job(&self) -> ToggleOutcome {
        let (running, hours, enabled) = {
            let inner = self.inner.lock().await;
            (
                inner.state.running(),
                inner.state.hours_for_start(),
                inner.state.button_enabled(),
            )
        };

        if !enabled {
            tracing::debug!(running, "Start/stop button is disabled, ignoring click");
            return ToggleOutcome::Ignored;
        }

        if running {
            self.stop_job().await
        } else {
            self.start_job(hours).await
        }
    }

    /// Handle a click on one of the duration buttons.
    pub async fn select_hours(&self, hours: u32) {
        let mut inner = self.inner.lock().await;
        inner.state.select_hours(hours);
        inner.view.set_button_enabled(true);
        inner.view.present();
        tracing::debug!(hours, "Selected run duration");
    }

    async fn stop_job(&self) -> ToggleOutcome {
        match self.api.stop().await {
            Ok(()) => {
                tracing::info!("Stop request accepted");
                // The next poll observes OFF and flips the state.
                let mut inner = self.inner.lock().await;
                render_button(&mut inner);
                inner.view.present();
                ToggleOutcome::StopRequested
            }
            Err(e) => {
                tracing::error!(error = %e, "Stop request failed");
                self.inner.lock().await.view.alert(ALERT_STOP_FAILED);
                ToggleOutcome::StopFailed
            }
        }
    }

    async fn start_job(&self, hours: u32) -> ToggleOutcome {
        match self.api.start(hours).await {
            Ok(()) => {
                tracing::info!(hours, "Start request accepted");
                {
                    let mut inner = self.inner.lock().await;
                    let display = inner.state.begin_start();
                    inner.view.set_button_enabled(false);
                    inner.view.set_status_text(&display.text);
                    inner.view.set_progress(display.progress);
                    inner.view.present();
                }

                // Pick up the server state now instead of waiting for the
                // next scheduled poll.
                if let Err(e) = self.refresh_status().await {
                    tracing::warn!(error = %e, "Post-start status refresh failed");
                }
                ToggleOutcome::Started
            }
            Err(e) => {
                tracing::error!(hours, error = %e, "Start request failed");
                self.inner.lock().await.view.alert(ALERT_START_FAILED);
                ToggleOutcome::StartFailed
            }
        }
    }
}

fn render_button<V: PanelView>(inner: &mut Inner<V>) {
    let button = inner.state.render_button();
    inner.view.set_button(&button);
}
