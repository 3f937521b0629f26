//! Line commands typed into the panel.
//!
//! Each command stands in for a click on the page: a duration button,
//! the start/stop button, or one of the extra read-only actions.

/// A parsed panel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click the duration button labelled with this many hours.
    SelectHours(u32),
    /// Click the start/stop button.
    Toggle,
    /// Fetch `/status` now instead of waiting for the next poll.
    Refresh,
    /// Show water counter, flow rate and open valves.
    Telemetry,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' is not a whole number of hours")]
    InvalidHours(String),

    #[error("No {hours} hour button (available: {available})")]
    UnavailableHours { hours: u32, available: String },
}

pub const HELP: &str = "\
commands:
  <n> | hours <n>     select an n hour run (must be one of the duration buttons)
  t | toggle | click  press the Start/STOP button
  r | refresh         poll job status now
  telemetry           show water counter, flow rate and open valves
  help                show this list
  q | quit            exit the panel";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// `hours_options` are the labels of the duration buttons; selecting
    /// any other value is rejected since there is no button to click.
    pub fn parse(line: &str, hours_options: &[u32]) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let head = head.to_ascii_lowercase();

        let command = match head.as_str() {
            "t" | "toggle" | "click" => Command::Toggle,
            "r" | "refresh" => Command::Refresh,
            "telemetry" => Command::Telemetry,
            "h" | "hours" => {
                let raw = words.next().unwrap_or_default();
                Command::SelectHours(select(raw, hours_options)?)
            }
            "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other if other.chars().all(|c| c.is_ascii_digit()) => {
                Command::SelectHours(select(other, hours_options)?)
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn select(raw: &str, hours_options: &[u32]) -> Result<u32, CommandError> {
    let hours: u32 = raw
        .parse()
        .map_err(|_| CommandError::InvalidHours(raw.to_string()))?;

    if !hours_options.contains(&hours) {
        return Err(CommandError::UnavailableHours {
            hours,
            available: format_options(hours_options),
        });
    }
    Ok(hours)
}

/// Render the duration buttons, e.g. `"1, 2, 4, 8"`.
pub fn format_options(hours_options: &[u32]) -> String {
    hours_options
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
