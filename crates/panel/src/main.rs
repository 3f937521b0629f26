//! `zonectl` -- terminal job-control panel for the zone irrigation controller.
//!
//! Polls the controller's `/status` endpoint, renders job progress and
//! the Start/STOP button on stdout, and reads duration / start / stop
//! commands from stdin.
//!
//! # Environment variables
//!
//! | Variable                       | Required | Default                 | Description                         |
//! |--------------------------------|----------|-------------------------|-------------------------------------|
//! | `ZONECTL_SERVER_URL`           | no       | `http://localhost:5000` | Controller HTTP API base URL        |
//! | `ZONECTL_POLL_INTERVAL_SECS`   | no       | `30`                    | Seconds between status polls        |
//! | `ZONECTL_REQUEST_TIMEOUT_SECS` | no       | `10`                    | Per-request HTTP timeout            |
//! | `ZONECTL_HOURS_OPTIONS`        | no       | `1,2,4,8`               | Comma-separated duration buttons    |

use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zonectl_client::api::HttpJobApi;
use zonectl_client::controller::PanelController;
use zonectl_client::poller::spawn_poller;
use zonectl_panel::app::{CommandLoop, Exit};
use zonectl_panel::config::PanelConfig;
use zonectl_panel::terminal::TerminalView;

/// How long to wait for the poller to wind down on exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the panel line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zonectl_panel=info,zonectl_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PanelConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        server_url = %config.server_url,
        poll_interval_secs = config.poll_interval.as_secs(),
        hours_options = ?config.hours_options,
        "Starting zonectl panel",
    );

    let api = HttpJobApi::with_timeout(config.server_url.clone(), config.request_timeout)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        });
    let api = Arc::new(api);

    let controller = Arc::new(PanelController::new(
        Arc::clone(&api),
        TerminalView::new(std::io::stdout()),
    ));
    controller.render_button_state().await;

    // --- Status poller ---
    let cancel = CancellationToken::new();
    let poller = spawn_poller(Arc::clone(&controller), config.poll_interval, cancel.clone());

    // --- Command loop ---
    let mut commands = CommandLoop {
        controller: controller.as_ref(),
        telemetry: api.as_ref(),
        hours_options: &config.hours_options,
        out: std::io::stdout(),
    };

    tokio::select! {
        result = commands.run(BufReader::new(tokio::io::stdin())) => {
            match result {
                Ok(Exit::Quit) => tracing::info!("Quit requested"),
                Ok(Exit::EndOfInput) => tracing::info!("Input closed"),
                Err(e) => tracing::error!(error = %e, "Command loop failed"),
            }
        }
        () = shutdown_signal() => {}
    }

    // --- Shutdown ---
    cancel.cancel();
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, poller).await.is_err() {
        tracing::warn!("Status poller did not stop in time");
    }
    tracing::info!("Panel stopped");

    // The blocking stdin reader cannot be interrupted and would keep the
    // runtime from shutting down.
    std::process::exit(0);
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
