//! Countdown engine.
//!
//! The countdown is a caller-driven state machine. It does not use internal
//! threads or timers - the host loop calls `tick()` once per second while
//! a session runs.
//!
//! ## State Transitions
//!
//! ```text
//! Ready -> Running -> (Paused | Ready-on-completion)
//! Paused -> Running
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = Countdown::new(25);
//! timer.start();
//! // Once per second:
//! timer.tick(); // Returns Some(TimerEvent::Completed) when the run ends
//! ```

use serde::{Deserialize, Serialize};

use crate::events::TimerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Ready,
    Running,
    Paused,
}

/// Core countdown state machine.
///
/// Invariant: `0 <= remaining_secs <= total_secs`. Completion leaves the
/// state `Ready` with `remaining_secs == 0`; the next `start()` rearms to
/// the full duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl Countdown {
    /// Create a countdown armed with `minutes`, in the `Ready` state.
    pub fn new(minutes: u32) -> Self {
        let total_secs = minutes * 60;
        Self {
            total_secs,
            remaining_secs: total_secs,
            state: TimerState::Ready,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// 0.0 .. 1.0 progress through the current run.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Rearm with a new duration. Silently ignored while running.
    pub fn set_time(&mut self, minutes: u32) {
        if self.state == TimerState::Running {
            return;
        }
        self.total_secs = minutes * 60;
        self.remaining_secs = self.total_secs;
        self.state = TimerState::Ready;
    }

    /// Begin or resume the countdown.
    ///
    /// A completed run (`remaining == 0`) rearms to the full duration
    /// first. A no-op while already running: there is never more than one
    /// active decrement loop.
    pub fn start(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Ready | TimerState::Paused => {
                if self.remaining_secs == 0 {
                    self.remaining_secs = self.total_secs;
                }
                self.state = TimerState::Running;
                Some(TimerEvent::Started {
                    total_secs: self.total_secs,
                })
            }
            TimerState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(TimerEvent::Paused {
                    remaining_secs: self.remaining_secs,
                })
            }
            _ => None,
        }
    }

    /// Stop and rearm to the full duration.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.state = TimerState::Ready;
        self.remaining_secs = self.total_secs;
        Some(TimerEvent::Reset)
    }

    /// Pause if running, start otherwise.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// One-second decrement. Only meaningful while running.
    ///
    /// Returns `Completed` exactly once per run, on the tick that reaches
    /// zero; the state drops back to `Ready` so further ticks are no-ops.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Ready;
            return Some(TimerEvent::Completed);
        }
        Some(TimerEvent::Tick {
            remaining_secs: self.remaining_secs,
        })
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Drive a running countdown for `n` ticks, counting completions.
    fn drive(timer: &mut Countdown, n: u32) -> u32 {
        let mut completions = 0;
        for _ in 0..n {
            if let Some(TimerEvent::Completed) = timer.tick() {
                completions += 1;
            }
        }
        completions
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = Countdown::new(25);
        assert_eq!(timer.state(), TimerState::Ready);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);

        assert!(timer.pause().is_some());
        assert_eq!(timer.state(), TimerState::Paused);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = Countdown::new(25);
        assert!(timer.start().is_some());
        assert!(timer.start().is_none());
    }

    #[test]
    fn set_time_while_running_is_noop() {
        let mut timer = Countdown::new(25);
        timer.start();
        timer.tick();
        timer.set_time(5);
        assert_eq!(timer.total_secs(), 25 * 60);
        assert_eq!(timer.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn completes_exactly_once() {
        let mut timer = Countdown::new(1);
        timer.start();
        assert_eq!(drive(&mut timer, 60), 1);
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.remaining_secs(), 0);
        // No further decrements after completion.
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn start_after_completion_rearms() {
        let mut timer = Countdown::new(1);
        timer.start();
        drive(&mut timer, 60);
        assert_eq!(timer.remaining_secs(), 0);
        timer.start();
        assert_eq!(timer.remaining_secs(), 60);
        assert!(timer.is_running());
    }

    #[test]
    fn pause_stops_decrement() {
        let mut timer = Countdown::new(25);
        timer.start();
        timer.tick();
        timer.pause();
        let before = timer.remaining_secs();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), before);
    }

    #[test]
    fn reset_rearms_full_duration() {
        let mut timer = Countdown::new(25);
        timer.start();
        drive(&mut timer, 10);
        assert_eq!(timer.reset(), Some(TimerEvent::Reset));
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn toggle_alternates() {
        let mut timer = Countdown::new(25);
        assert!(matches!(timer.toggle(), Some(TimerEvent::Started { .. })));
        assert!(matches!(timer.toggle(), Some(TimerEvent::Paused { .. })));
        assert!(matches!(timer.toggle(), Some(TimerEvent::Started { .. })));
    }

    #[test]
    fn tick_reports_remaining() {
        let mut timer = Countdown::new(1);
        timer.start();
        assert_eq!(
            timer.tick(),
            Some(TimerEvent::Tick { remaining_secs: 59 })
        );
    }

    proptest! {
        #[test]
        fn set_time_arms_minutes_in_seconds(m in 1u32..=120) {
            let mut timer = Countdown::new(25);
            timer.set_time(m);
            prop_assert_eq!(timer.total_secs(), m * 60);
            prop_assert_eq!(timer.remaining_secs(), m * 60);
        }

        #[test]
        fn full_run_completes_after_total_ticks(m in 1u32..=10) {
            let mut timer = Countdown::new(m);
            timer.start();
            // One completion in exactly m*60 ticks, none before.
            prop_assert_eq!(drive(&mut timer, m * 60 - 1), 0);
            prop_assert_eq!(drive(&mut timer, 1), 1);
        }
    }
}
