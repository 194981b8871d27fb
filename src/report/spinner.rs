// src/report/spinner.rs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::Reporter;
use crate::types::OutputStyle;

/// Frames cycled by the pre-step spinner.
pub const SPINNER_FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

const TICK: Duration = Duration::from_millis(80);

/// Clears the bar if the spinner future is dropped before it finishes.
struct SpinnerGuard(ProgressBar);

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if !self.0.is_finished() {
            self.0.finish_and_clear();
        }
    }
}

impl Reporter {
    /// Animate a single line for `hint`, then leave the message on its own
    /// line.
    ///
    /// The duration is a fixed cosmetic hint and is unrelated to how long the
    /// following command takes. Does nothing for `Plain` output or a zero
    /// hint, or when output is captured. Dropping the future stops the
    /// animation early.
    pub async fn spinner(&self, message: &str, hint: Duration) {
        if self.style() == OutputStyle::Plain || hint.is_zero() || !self.is_terminal() {
            return;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg}") {
            bar.set_style(style.tick_chars(SPINNER_FRAMES));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);
        let guard = SpinnerGuard(bar);

        tokio::time::sleep(hint).await;

        guard.0.finish_with_message(message.to_string());
    }
}
