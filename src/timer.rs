//! Work/relax phase state machine driven by fixed-interval ticks.
//!
//! Elapsed time is kept as a `Duration` and advanced by whole tick intervals,
//! so phase boundaries land exactly on multiples of the tick no matter how
//! long the timer runs.

use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, time::Duration};

use crate::readout::Readout;

pub const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Relax,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Relax => "RELAX",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Relax,
            Self::Relax => Self::Work,
        }
    }

    pub fn accent(self) -> Accent {
        match self {
            Self::Work => Accent::Work,
            Self::Relax => Accent::Relax,
        }
    }
}

/// Which of the two accent colors the presentation layer should paint with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Work,
    Relax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub work: Duration,
    pub relax: Duration,
}

impl PhaseDurations {
    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::Relax => self.relax,
        }
    }
}

/// What happens to the part of a tick that lands past the phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// The new phase starts at exactly zero and the overshoot is dropped.
    #[default]
    Reset,
    /// The overshoot becomes the new phase's elapsed time.
    Carry,
}

impl BoundaryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Carry => "carry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is stopped; nothing changed.
    Idle,
    Advanced,
    PhaseChanged { from: Phase, to: Phase },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTimer {
    phase: Phase,
    elapsed: Duration,
    running: bool,
    tick_interval: Duration,
    durations: PhaseDurations,
    policy: BoundaryPolicy,
    completed_phases: u64,
}

impl PhaseTimer {
    /// A stopped timer at the start of a work phase.
    pub fn new(durations: PhaseDurations, tick_interval: Duration, policy: BoundaryPolicy) -> Self {
        Self {
            phase: Phase::Work,
            elapsed: Duration::ZERO,
            running: false,
            tick_interval,
            durations,
            policy,
            completed_phases: 0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Starts a stopped timer or stops a running one. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    /// Advances the timer by one tick interval, flipping the phase when its
    /// duration is reached. Ticking a stopped timer does nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.elapsed += self.tick_interval;
        let duration = self.phase_duration();
        if self.elapsed < duration {
            return TickOutcome::Advanced;
        }

        let overshoot = self.elapsed - duration;
        let from = self.phase;
        self.phase = from.flipped();
        self.completed_phases += 1;
        self.elapsed = match self.policy {
            BoundaryPolicy::Reset => Duration::ZERO,
            // A carried overshoot must still leave the new phase unfinished.
            BoundaryPolicy::Carry if overshoot < self.phase_duration() => overshoot,
            BoundaryPolicy::Carry => Duration::ZERO,
        };

        TickOutcome::PhaseChanged { from, to: self.phase }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn completed_phases(&self) -> u64 {
        self.completed_phases
    }

    pub fn phase_duration(&self) -> Duration {
        self.durations.for_phase(self.phase)
    }

    /// Whole seconds left in the phase, rounded down.
    pub fn remaining_seconds(&self) -> u64 {
        self.phase_duration().saturating_sub(self.elapsed).as_secs()
    }

    /// `round((1 - frac(elapsed)) * 100) mod 100`, computed on integer nanoseconds.
    pub fn remaining_centiseconds(&self) -> u8 {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        const NANOS_PER_CENTI: u64 = 10_000_000;

        let left = NANOS_PER_SEC - u64::from(self.elapsed.subsec_nanos());
        (((left + NANOS_PER_CENTI / 2) / NANOS_PER_CENTI) % 100) as u8
    }

    /// Half a turn over the course of one phase.
    pub fn rotation_angle(&self) -> f64 {
        PI * self.progress()
    }

    pub fn progress(&self) -> f64 {
        let duration = self.phase_duration();
        if duration.is_zero() {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / duration.as_secs_f64()
    }

    pub fn accent(&self) -> Accent {
        self.phase.accent()
    }

    pub fn readout(&self) -> Readout {
        Readout {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds(),
            remaining_centiseconds: self.remaining_centiseconds(),
            rotation_angle: self.rotation_angle(),
            accent: self.accent(),
            progress: self.progress(),
            running: self.running,
            phase_duration: self.phase_duration(),
        }
    }
}
