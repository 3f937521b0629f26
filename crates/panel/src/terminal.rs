//! Line-oriented terminal rendering of the panel.
//!
//! [`TerminalView`] keeps the current widget state and writes one summary
//! line each time the controller presents a batch of updates:
//!
//! ```text
//! 14:02:11 | Zone 3                 | ########------------  42% | [!STOP!]
//! ```
//!
//! A disabled button is shown in parentheses, a danger-styled one between
//! exclamation marks. Alerts go on their own line, prefixed with `!!` and
//! a terminal bell.

use std::io::Write;

use chrono::{DateTime, Utc};
use zonectl_client::view::PanelView;
use zonectl_core::display::{ButtonStyle, ButtonView, ProgressBar, LABEL_START};

const BAR_WIDTH: usize = 20;

pub struct TerminalView<W> {
    out: W,
    status_text: String,
    progress: ProgressBar,
    label: &'static str,
    style: ButtonStyle,
    enabled: bool,
    last_update: Option<DateTime<Utc>>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status_text: String::new(),
            progress: ProgressBar::empty(),
            label: LABEL_START,
            style: ButtonStyle::Primary,
            enabled: false,
            last_update: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// The summary line for the current widget state.
    pub fn render_line(&self) -> String {
        let stamp = self
            .last_update
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string());

        format!(
            "{stamp} | {:<22} | {} | {}",
            self.status_text,
            render_bar(&self.progress),
            render_button(self.label, self.style, self.enabled),
        )
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write panel output");
        }
    }
}

/// Draw a fixed-width bar. Animated bars are drawn with `~` and tagged
/// `busy` in place of a percentage.
pub fn render_bar(progress: &ProgressBar) -> String {
    if progress.animated {
        return format!("{} busy", "~".repeat(BAR_WIDTH));
    }

    let clamped = progress.percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{} {:>4}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.width()
    )
}

pub fn render_button(label: &str, style: ButtonStyle, enabled: bool) -> String {
    let label = match style {
        ButtonStyle::Primary => label.to_string(),
        ButtonStyle::Danger => format!("!{label}!"),
    };
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

impl<W: Write + Send> PanelView for TerminalView<W> {
    fn set_status_text(&mut self, text: &str) {
        self.status_text = text.to_string();
    }

    fn set_progress(&mut self, progress: ProgressBar) {
        self.progress = progress;
    }

    fn set_button(&mut self, button: &ButtonView) {
        self.label = button.label;
        self.style = button.style;
        self.enabled = button.enabled;
    }

    fn set_button_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn alert(&mut self, message: &str) {
        self.write_line(&format!("\x07!! {message}"));
    }

    fn set_last_update(&mut self, at: DateTime<Utc>) {
        self.last_update = Some(at);
    }

    fn present(&mut self) {
        let line = self.render_line();
        self.write_line(&line);
    }
}
