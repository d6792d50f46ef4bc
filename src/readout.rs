use std::time::Duration;

use crate::timer::{Accent, Phase};

/// Phases at least this long show minutes and seconds instead of seconds and centiseconds.
const MINUTES_LABEL_THRESHOLD: Duration = Duration::from_secs(60);

/// Everything the screen needs from the timer after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub remaining_centiseconds: u8,
    pub rotation_angle: f64,
    pub accent: Accent,
    pub progress: f64,
    pub running: bool,
    pub phase_duration: Duration,
}

impl Readout {
    /// Countdown text: `SS:CC` for sub-minute phases, `MM:SS` otherwise.
    pub fn label(&self) -> String {
        if self.phase_duration < MINUTES_LABEL_THRESHOLD {
            format!("{:02}:{:02}", self.remaining_seconds, self.remaining_centiseconds)
        } else {
            format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
        }
    }

    pub fn status(&self) -> &'static str {
        if self.running { "RUNNING" } else { "STOPPED" }
    }
}
