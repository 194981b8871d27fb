// src/report/mod.rs

//! Terminal feedback: section headers, status lines, the plan/summary and
//! the pre-step spinner.
//!
//! Everything here is presentational. Nothing returns an error; a failed
//! write to the terminal is simply dropped.

mod render;
mod spinner;

pub use render::{Captured, Reporter};
pub use spinner::SPINNER_FRAMES;
