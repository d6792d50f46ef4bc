use log::info;
use std::time::{Duration, Instant};

use crate::timer::{PhaseTimer, TickOutcome};

/// Drives the single `PhaseTimer` at its tick cadence.
///
/// The event loop asks for `poll_timeout` before waiting on input and calls
/// `pump` afterwards. Once `stop` returns, `pump` will not tick again until
/// the next `start`.
pub struct Ticker {
    timer: PhaseTimer,
    last_tick: Option<Instant>,
}

impl Ticker {
    pub fn new(timer: PhaseTimer) -> Self {
        Self { timer, last_tick: None }
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    pub fn start(&mut self, now: Instant) {
        if self.timer.is_running() {
            return;
        }
        self.timer.start();
        self.last_tick = Some(now);
        self.log_transition();
    }

    pub fn stop(&mut self) {
        if !self.timer.is_running() {
            return;
        }
        self.timer.stop();
        self.last_tick = None;
        self.log_transition();
    }

    fn log_transition(&self) {
        info!(
            "{} {} phase with {:.2?} elapsed",
            if self.timer.is_running() { "Started" } else { "Stopped" },
            self.timer.phase().name(),
            self.timer.elapsed()
        );
    }

    /// The single user action: start when stopped, stop when running.
    pub fn toggle(&mut self, now: Instant) -> bool {
        let running = self.timer.toggle();
        self.last_tick = running.then_some(now);
        self.log_transition();
        running
    }

    /// How long the caller may block before the next tick is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let interval = self.timer.tick_interval();
        match self.last_tick {
            Some(last) => interval.saturating_sub(now.saturating_duration_since(last)),
            None => interval,
        }
    }

    /// Ticks the timer once if a full interval has passed since the last tick.
    pub fn pump(&mut self, now: Instant) -> TickOutcome {
        let Some(last) = self.last_tick else {
            return TickOutcome::Idle;
        };
        let interval = self.timer.tick_interval();
        let since = now.saturating_duration_since(last);
        if since < interval {
            return TickOutcome::Idle;
        }

        // Keep the cadence anchored to when ticks were due; re-anchor once a full tick behind
        self.last_tick = Some(if since >= interval * 2 { now } else { last + interval });
        let outcome = self.timer.tick();
        if let TickOutcome::PhaseChanged { from, to } = outcome {
            info!(
                "Phase change: {} -> {} ({} completed)",
                from.name(),
                to.name(),
                self.timer.completed_phases()
            );
        }
        outcome
    }
}
