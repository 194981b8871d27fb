// src/report/render.rs

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};

use crate::engine::{Step, StepOutcome};
use crate::errors::UpkeepError;
use crate::types::{OutputStyle, RunMode, StatusKind};

/// Where rendered lines end up.
#[derive(Clone, Debug)]
enum Target {
    Terminal,
    Captured(Captured),
}

/// In-memory copy of everything a reporter printed (stdout and stderr
/// interleaved, in call order).
#[derive(Clone, Debug, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn text(&self) -> String {
        let buf = match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut guard) => guard.extend_from_slice(buf),
            Err(poisoned) => poisoned.into_inner().extend_from_slice(buf),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Stateless terminal reporter.
///
/// Only carries rendering settings; it holds no progress state between calls.
/// Write errors (a closed pipe, a full disk) are swallowed.
#[derive(Clone, Debug)]
pub struct Reporter {
    style: OutputStyle,
    spinner: Duration,
    target: Target,
}

impl Reporter {
    pub fn new(style: OutputStyle, spinner: Duration) -> Self {
        Self {
            style,
            spinner,
            target: Target::Terminal,
        }
    }

    /// Plain text with no spinner; used for non-interactive output and tests.
    pub fn plain() -> Self {
        Self::new(OutputStyle::Plain, Duration::ZERO)
    }

    /// Redirect all output into memory. The spinner is disabled.
    pub fn captured(self) -> (Self, Captured) {
        let captured = Captured::default();
        let reporter = Self {
            spinner: Duration::ZERO,
            target: Target::Captured(captured.clone()),
            ..self
        };
        (reporter, captured)
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Fixed animation time shown before each step.
    pub fn spinner_hint(&self) -> Duration {
        self.spinner
    }

    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self.target, Target::Terminal)
    }

    pub fn header(&self, title: &str) {
        let line = render_section_header(title);
        let rendered = match self.style {
            OutputStyle::Plain => line,
            OutputStyle::Rich => colorize(section_style(), &line),
        };
        self.emit(false, &[String::new(), rendered]);
    }

    pub fn status(&self, kind: StatusKind, message: &str) {
        let line = render_status_line(self.style, kind, message);
        // Errors go to stderr so they survive `upkeep > out.txt`.
        self.emit(kind == StatusKind::Error, &[line]);
    }

    /// Echo captured command output, indented under the current step.
    pub fn output(&self, text: &str) {
        self.emit(false, &render_output_block(self.style, text));
    }

    pub fn plan(&self, steps: &[Step], package_manager: &str, mode: RunMode) {
        self.header("Plan");
        self.emit(false, &render_plan_lines(self.style, steps, package_manager, mode));
    }

    pub fn summary(&self, outcomes: &[StepOutcome], mode: RunMode, elapsed: Duration) {
        self.header("Summary");
        self.emit(false, &render_summary_lines(self.style, outcomes, mode, elapsed));
    }

    /// Print a fatal error, followed by a failed command's trimmed stderr.
    pub fn failure(&self, err: &UpkeepError) {
        self.emit(true, &render_failure_lines(self.style, err));
    }

    fn emit(&self, to_stderr: bool, lines: &[String]) {
        match &self.target {
            Target::Terminal if to_stderr => write_lines(std::io::stderr().lock(), lines),
            Target::Terminal => write_lines(std::io::stdout().lock(), lines),
            Target::Captured(captured) => write_lines(captured.clone(), lines),
        }
    }
}

/// Write each line, giving up quietly at the first error.
pub(crate) fn write_lines(mut out: impl Write, lines: &[String]) {
    for line in lines {
        if writeln!(out, "{line}").is_err() {
            return;
        }
    }
    let _ = out.flush();
}

fn status_marker(style: OutputStyle, kind: StatusKind) -> String {
    match style {
        OutputStyle::Plain => format!("[{kind}]"),
        OutputStyle::Rich => {
            let glyph = match kind {
                StatusKind::Success => "✔",
                StatusKind::Warning => "!",
                StatusKind::Error => "✘",
                StatusKind::Info => "•",
            };
            colorize(status_style(kind), glyph)
        }
    }
}

fn status_style(kind: StatusKind) -> Style {
    let color = match kind {
        StatusKind::Success => AnsiColor::BrightGreen,
        StatusKind::Warning => AnsiColor::BrightYellow,
        StatusKind::Error => AnsiColor::BrightRed,
        StatusKind::Info => AnsiColor::BrightCyan,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn output_style() -> Style {
    Style::new().effects(Effects::DIMMED)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    format!("{secs}.{millis:03}s")
}

pub(crate) fn render_section_header(title: &str) -> String {
    format!("== {title} ==")
}

pub(crate) fn render_status_line(style: OutputStyle, kind: StatusKind, message: &str) -> String {
    format!("{} {}", status_marker(style, kind), message)
}

pub(crate) fn render_output_block(style: OutputStyle, text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| match style {
            OutputStyle::Plain => format!("    {line}"),
            OutputStyle::Rich => format!("    {}", colorize(output_style(), line)),
        })
        .collect()
}

pub(crate) fn render_plan_lines(
    style: OutputStyle,
    steps: &[Step],
    package_manager: &str,
    mode: RunMode,
) -> Vec<String> {
    let mut lines: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            format!(
                "  {}. {:<28} {}",
                idx + 1,
                step.title(),
                step.command(package_manager)
            )
        })
        .collect();

    if mode.is_dry_run() {
        lines.push(render_status_line(
            style,
            StatusKind::Warning,
            "dry run: nothing will be executed",
        ));
    }
    lines
}

pub(crate) fn render_summary_lines(
    style: OutputStyle,
    outcomes: &[StepOutcome],
    mode: RunMode,
    elapsed: Duration,
) -> Vec<String> {
    let mut lines: Vec<String> = outcomes
        .iter()
        .map(|outcome| {
            let (kind, verb) = match outcome {
                StepOutcome::Completed(..) => (StatusKind::Success, "done"),
                StepOutcome::Simulated(_) => (StatusKind::Info, "skipped (dry run)"),
            };
            render_status_line(style, kind, &format!("{}: {verb}", outcome.step().title()))
        })
        .collect();

    let closing = if mode.is_dry_run() {
        format!(
            "Dry run finished in {}; no changes were made.",
            format_elapsed(elapsed)
        )
    } else {
        format!("System is up to date ({}).", format_elapsed(elapsed))
    };
    lines.push(render_status_line(style, StatusKind::Success, &closing));
    lines
}

pub(crate) fn render_failure_lines(style: OutputStyle, err: &UpkeepError) -> Vec<String> {
    let mut lines = vec![render_status_line(style, StatusKind::Error, &err.to_string())];
    if let Some(stderr) = err.command_stderr() {
        lines.extend(stderr.lines().map(|line| format!("    {}", line.trim_end())));
    }
    lines
}
