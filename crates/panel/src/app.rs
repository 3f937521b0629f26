//! Interactive command loop.
//!
//! Reads one [`Command`] per input line and dispatches it to the
//! [`PanelController`]. Runs until `quit` or end of input; status polling
//! continues independently in its own task.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use zonectl_client::api::{JobApi, TelemetryApi};
use zonectl_client::controller::{PanelController, ToggleOutcome};
use zonectl_client::view::PanelView;

use crate::commands::{format_options, Command, HELP};

/// Why the command loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
}

pub struct CommandLoop<'a, A, V, T, W> {
    pub controller: &'a PanelController<A, V>,
    pub telemetry: &'a T,
    pub hours_options: &'a [u32],
    /// Where command feedback (help, errors, telemetry) is written.
    pub out: W,
}

impl<A, V, T, W> CommandLoop<'_, A, V, T, W>
where
    A: JobApi,
    V: PanelView,
    T: TelemetryApi,
    W: Write,
{
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<Exit>
    where
        R: AsyncBufRead + Unpin,
    {
        self.say(&format!(
            "duration buttons: {} (type 'help' for commands)",
            format_options(self.hours_options)
        ))?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line, self.hours_options) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => return Ok(Exit::Quit),
                Ok(Some(command)) => self.dispatch(command).await?,
                Err(e) => self.say(&e.to_string())?,
            }
        }

        Ok(Exit::EndOfInput)
    }

    async fn dispatch(&mut self, command: Command) -> std::io::Result<()> {
        tracing::debug!(?command, "Dispatching panel command");

        match command {
            Command::SelectHours(hours) => {
                self.controller.select_hours(hours).await;
            }
            Command::Toggle => match self.controller.toggle_job().await {
                ToggleOutcome::Ignored => {
                    self.say("The start/stop button is disabled; select a duration first")?;
                }
                outcome => tracing::info!(?outcome, "Start/stop clicked"),
            },
            Command::Refresh => {
                if let Err(e) = self.controller.refresh_status().await {
                    tracing::warn!(error = %e, "Manual status refresh failed");
                    self.say(&format!("status unavailable: {e}"))?;
                }
            }
            Command::Telemetry => match self.telemetry.telemetry().await {
                Ok(snapshot) => self.say(&snapshot.to_string())?,
                Err(e) => {
                    tracing::warn!(error = %e, "Telemetry request failed");
                    self.say(&format!("telemetry unavailable: {e}"))?;
                }
            },
            Command::Help => self.say(HELP)?,
            Command::Quit => {}
        }

        Ok(())
    }

    fn say(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }
}
