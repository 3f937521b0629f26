//! Repeating status poll.
//!
//! Refreshes the panel once immediately and then on a fixed interval
//! until the [`CancellationToken`] is triggered. Cancellation also
//! abandons a poll that is still in flight. Failed polls are logged and
//! dropped; the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::JobApi;
use crate::controller::PanelController;
use crate::view::PanelView;

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn [`run_poller`] as a background task.
pub fn spawn_poller<A, V>(
    controller: Arc<PanelController<A, V>>,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()>
where
    A: JobApi + 'static,
    V: PanelView + 'static,
{
    tokio::spawn(async move {
        run_poller(&controller, interval, cancel).await;
    })
}

/// Poll `/status` every `interval` until `cancel` fires.
pub async fn run_poller<A, V>(
    controller: &PanelController<A, V>,
    interval: Duration,
    cancel: CancellationToken,
) where
    A: JobApi,
    V: PanelView,
{
    let mut ticker = tokio::time::interval(interval);
    // A slow controller must not cause a burst of catch-up polls.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut poll: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(polls = poll, "Status poller cancelled");
                break;
            }
            _ = ticker.tick() => {
                poll += 1;
                // Cancellation abandons an in-flight poll.
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!(poll, "Status poller cancelled during poll");
                        break;
                    }
                    result = controller.refresh_status() => match result {
                        Ok(status) => {
                            tracing::debug!(poll, ?status, "Status poll complete");
                        }
                        Err(e) => {
                            tracing::warn!(poll, error = %e, "Status poll failed");
                        }
                    },
                }
            }
        }
    }
}
