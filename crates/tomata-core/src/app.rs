//! Orchestration layer.
//!
//! Central dispatch over the two exclusive top-level modes. The mode is a
//! tagged variant - `Single` carries the work/break classification, `Plan`
//! carries the sequencer - so every behavioral fork dispatches once on the
//! variant instead of re-checking flags in scattered handlers.
//!
//! The `App` owns the countdown, the data store, and the config. Commands
//! and the 1 Hz `tick()` return [`AppEvent`]s for the shell to render;
//! nothing in here draws or notifies directly.

use std::time::Instant;

use tracing::debug;

use crate::error::ValidationError;
use crate::events::{AppEvent, StatusLabel, TimerEvent, TopMode};
use crate::mode::SessionKind;
use crate::plan::{PlanSequencer, PlanStatus, PlanStep};
use crate::presets::{PresetSet, MAX_PRESET_MIN, MIN_PRESET_MIN};
use crate::stats::Stats;
use crate::storage::{AppConfig, DataStore};
use crate::timer::{Countdown, TimerState};

/// Top-level application mode with its owned state.
#[derive(Debug)]
pub enum AppMode {
    Single {
        mode: SessionKind,
    },
    Plan {
        seq: PlanSequencer,
        /// Work/break kind to restore when switching back to single mode.
        prior: SessionKind,
    },
}

pub struct App {
    timer: Countdown,
    mode: AppMode,
    store: DataStore,
    config: AppConfig,
    /// Remaining grace ticks before a plan step auto-starts.
    pending_auto_start: Option<u32>,
}

impl App {
    pub fn new(store: DataStore, config: AppConfig) -> Self {
        let timer = Countdown::new(config.timer.default_work_min);
        Self {
            timer,
            mode: AppMode::Single {
                mode: SessionKind::Work,
            },
            store,
            config,
            pending_auto_start: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn top_mode(&self) -> TopMode {
        match self.mode {
            AppMode::Single { .. } => TopMode::Single,
            AppMode::Plan { .. } => TopMode::Plan,
        }
    }

    /// The classification governing the current (or next) session.
    pub fn session_kind(&self) -> SessionKind {
        match &self.mode {
            AppMode::Single { mode } => *mode,
            AppMode::Plan { seq, .. } => seq
                .current()
                .or_else(|| seq.first())
                .map(|s| s.kind)
                .unwrap_or(SessionKind::Work),
        }
    }

    pub fn plan_status(&self) -> Option<PlanStatus> {
        match &self.mode {
            AppMode::Plan { seq, .. } => Some(seq.status()),
            AppMode::Single { .. } => None,
        }
    }

    pub fn stats(&self) -> &Stats {
        self.store.stats()
    }

    pub fn presets(&self) -> &PresetSet {
        self.store.presets()
    }

    pub fn auto_start_pending(&self) -> bool {
        self.pending_auto_start.is_some()
    }

    /// The status-label contract table.
    pub fn status_label(&self) -> StatusLabel {
        match (&self.mode, self.timer.state()) {
            (_, TimerState::Paused) => StatusLabel::Paused,
            (AppMode::Single { mode }, TimerState::Running) => match mode {
                SessionKind::Work => StatusLabel::Focusing,
                SessionKind::Break => StatusLabel::Resting,
            },
            (AppMode::Single { mode }, TimerState::Ready) => match mode {
                SessionKind::Work => StatusLabel::ReadyToFocus,
                SessionKind::Break => StatusLabel::ReadyToRest,
            },
            (AppMode::Plan { seq, .. }, TimerState::Running) => {
                match seq.current().map(|s| s.kind) {
                    Some(SessionKind::Break) => StatusLabel::Resting,
                    _ => StatusLabel::Focusing,
                }
            }
            (AppMode::Plan { .. }, TimerState::Ready) => StatusLabel::ReadyForPlan,
        }
    }

    // ── Timer commands ───────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<AppEvent> {
        let mut out = Vec::new();
        if let Some(TimerEvent::Started { .. }) = self.timer.start() {
            // Entering a plan run seeds the cursor before the first tick.
            if let AppMode::Plan { seq, .. } = &mut self.mode {
                if !seq.is_running() {
                    seq.start();
                }
            }
            out.push(AppEvent::StatusChanged {
                label: self.status_label(),
            });
            out.push(AppEvent::InputsEnabled { enabled: false });
        }
        out
    }

    pub fn pause(&mut self) -> Vec<AppEvent> {
        let mut out = Vec::new();
        if self.pending_auto_start.take().is_some() {
            // Pausing inside the grace window cancels the pending
            // auto-start; the plan stays mid-run with the next step armed.
            debug!("auto-start cancelled by pause");
            out.push(AppEvent::StatusChanged {
                label: self.status_label(),
            });
            return out;
        }
        if let Some(TimerEvent::Paused { .. }) = self.timer.pause() {
            out.push(AppEvent::StatusChanged {
                label: StatusLabel::Paused,
            });
        }
        out
    }

    pub fn toggle(&mut self) -> Vec<AppEvent> {
        if self.pending_auto_start.is_some() || self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and rearm. In plan mode this is a manual abort of the run.
    pub fn reset(&mut self) -> Vec<AppEvent> {
        let mut out = Vec::new();
        self.pending_auto_start = None;
        if let AppMode::Plan { seq, .. } = &mut self.mode {
            seq.stop();
        }
        self.timer.reset();
        out.extend(self.seed_plan_preview());
        out.push(AppEvent::StatusChanged {
            label: self.status_label(),
        });
        out.push(AppEvent::InputsEnabled { enabled: true });
        out
    }

    /// Arm a new duration (preset selection / wheel input, single mode).
    pub fn set_time(&mut self, minutes: u32) -> Result<Vec<AppEvent>, ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy("timer is running".into()));
        }
        if let AppMode::Plan { .. } = self.mode {
            return Err(ValidationError::InvalidValue {
                field: "minutes".into(),
                message: "duration follows the plan in plan mode".into(),
            });
        }
        validate_minutes(minutes)?;
        self.timer.set_time(minutes);
        Ok(vec![AppEvent::TimerArmed { minutes }])
    }

    // ── Mode commands ────────────────────────────────────────────────

    /// Change the work/break classification (single mode only).
    ///
    /// Vetoed while the timer runs. An accepted change - including a
    /// same-kind set - resets the timer to the kind's default duration
    /// and reports exactly one `ModeChanged`.
    pub fn set_mode(&mut self, kind: SessionKind) -> Result<Vec<AppEvent>, ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy(
                "cannot change mode while the timer runs".into(),
            ));
        }
        match &mut self.mode {
            AppMode::Single { mode } => *mode = kind,
            AppMode::Plan { .. } => {
                return Err(ValidationError::InvalidValue {
                    field: "mode".into(),
                    message: "work/break selection applies in single mode".into(),
                })
            }
        }
        let minutes = self.config.default_minutes(kind);
        self.timer.set_time(minutes);
        self.timer.reset();
        Ok(vec![
            AppEvent::ModeChanged { kind },
            AppEvent::TimerArmed { minutes },
            AppEvent::AccentChanged { kind },
            AppEvent::StatusChanged {
                label: self.status_label(),
            },
        ])
    }

    /// Switch between single and plan top-level modes.
    ///
    /// Vetoed while the timer runs. Entering plan mode rebuilds the
    /// sequencer from the persisted list and seeds the timer from its
    /// first step (or the configured fallback); leaving it aborts any
    /// paused run and restores the mode-driven default.
    pub fn set_app_mode(&mut self, top: TopMode) -> Result<Vec<AppEvent>, ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy(
                "cannot switch modes while the timer runs".into(),
            ));
        }
        let mut out = Vec::new();
        self.pending_auto_start = None;
        match (top, self.top_mode()) {
            (TopMode::Plan, TopMode::Single) => {
                let prior = self.session_kind();
                let seq = PlanSequencer::from_steps(self.store.plan_list().to_vec());
                self.mode = AppMode::Plan { seq, prior };
                out.push(AppEvent::AppModeChanged {
                    mode: TopMode::Plan,
                });
                out.extend(self.seed_plan_preview());
                out.push(AppEvent::StatusChanged {
                    label: self.status_label(),
                });
            }
            (TopMode::Single, TopMode::Plan) => {
                let kind = match &self.mode {
                    AppMode::Plan { prior, .. } => *prior,
                    AppMode::Single { mode } => *mode,
                };
                self.mode = AppMode::Single { mode: kind };
                let minutes = self.config.default_minutes(kind);
                self.timer.set_time(minutes);
                self.timer.reset();
                out.push(AppEvent::AppModeChanged {
                    mode: TopMode::Single,
                });
                out.push(AppEvent::TimerArmed { minutes });
                out.push(AppEvent::AccentChanged { kind });
                out.push(AppEvent::StatusChanged {
                    label: self.status_label(),
                });
            }
            _ => {} // Already in the requested mode.
        }
        Ok(out)
    }

    // ── Plan edits ───────────────────────────────────────────────────

    pub fn plan_add(
        &mut self,
        minutes: u32,
        kind: SessionKind,
        now: Instant,
    ) -> Result<(PlanStep, Vec<AppEvent>), ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy("timer is running".into()));
        }
        validate_minutes(minutes)?;
        let step = match &mut self.mode {
            AppMode::Plan { seq, .. } => seq.add_item(minutes, kind),
            AppMode::Single { .. } => return Err(not_in_plan_mode()),
        };
        self.persist_plan(now);
        let events = self.seed_plan_preview();
        Ok((step, events))
    }

    pub fn plan_delete(
        &mut self,
        index: usize,
        now: Instant,
    ) -> Result<Vec<AppEvent>, ValidationError> {
        match &mut self.mode {
            AppMode::Plan { seq, .. } => {
                if seq.is_running() {
                    return Err(ValidationError::Busy("plan is running".into()));
                }
                seq.delete_item(index)?;
            }
            AppMode::Single { .. } => return Err(not_in_plan_mode()),
        }
        self.persist_plan(now);
        Ok(self.seed_plan_preview())
    }

    pub fn plan_reorder(
        &mut self,
        from: usize,
        to: usize,
        now: Instant,
    ) -> Result<Vec<AppEvent>, ValidationError> {
        match &mut self.mode {
            AppMode::Plan { seq, .. } => {
                if seq.is_running() {
                    return Err(ValidationError::Busy("plan is running".into()));
                }
                seq.reorder(from, to)?;
            }
            AppMode::Single { .. } => return Err(not_in_plan_mode()),
        }
        self.persist_plan(now);
        Ok(self.seed_plan_preview())
    }

    // ── Presets ──────────────────────────────────────────────────────

    pub fn add_preset(
        &mut self,
        kind: SessionKind,
        minutes: u32,
    ) -> Result<bool, ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy("timer is running".into()));
        }
        let mut added = false;
        self.store.update_presets(|p| added = p.add(kind, minutes));
        Ok(added)
    }

    pub fn remove_preset(
        &mut self,
        kind: SessionKind,
        minutes: u32,
    ) -> Result<bool, ValidationError> {
        if self.timer.is_running() {
            return Err(ValidationError::Busy("timer is running".into()));
        }
        let mut removed = false;
        self.store.update_presets(|p| removed = p.remove(kind, minutes));
        Ok(removed)
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance one second of app time.
    ///
    /// Drives the countdown, the auto-start grace counter, and the
    /// debounced persistence flush.
    pub fn tick(&mut self, now: Instant) -> Vec<AppEvent> {
        let mut out = Vec::new();

        if let Some(grace) = self.pending_auto_start {
            let grace = grace.saturating_sub(1);
            if grace == 0 {
                self.pending_auto_start = None;
                out.extend(self.start());
            } else {
                self.pending_auto_start = Some(grace);
            }
            self.store.flush_due(now);
            return out;
        }

        match self.timer.tick() {
            Some(TimerEvent::Completed) => self.on_completed(&mut out),
            Some(TimerEvent::Tick { .. }) | None => {}
            Some(_) => {}
        }
        self.store.flush_due(now);
        out
    }

    /// Write any pending debounced change; call on shutdown.
    pub fn flush(&mut self) {
        self.store.flush();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_completed(&mut self, out: &mut Vec<AppEvent>) {
        let delay = self.config.timer.auto_advance_delay_secs;
        let fallback_min = self.config.timer.plan_fallback_min;
        let mut start_now = false;

        match &mut self.mode {
            AppMode::Single { mode } => {
                let kind = *mode;
                let minutes = self.timer.total_secs() / 60;
                if kind.is_work() {
                    self.store.record_session(minutes);
                    out.push(AppEvent::Notification {
                        title: "Pomodoro complete".into(),
                        body: "Great work - time for a break.".into(),
                    });
                } else {
                    out.push(AppEvent::Notification {
                        title: "Break over".into(),
                        body: "Ready to get back to it?".into(),
                    });
                }
                out.push(AppEvent::SessionCompleted { kind, minutes });
                out.push(AppEvent::StatusChanged {
                    label: match kind {
                        SessionKind::Work => StatusLabel::ReadyToFocus,
                        SessionKind::Break => StatusLabel::ReadyToRest,
                    },
                });
                out.push(AppEvent::InputsEnabled { enabled: true });
            }
            AppMode::Plan { seq, .. } => {
                // Record the step that just finished before advancing.
                if let Some(step) = seq.current() {
                    if step.kind.is_work() {
                        let minutes = step.minutes;
                        self.store.record_session(minutes);
                    }
                }
                match seq.next() {
                    Some(step) => {
                        let index = seq.status().cursor.max(0) as usize;
                        self.timer.set_time(step.minutes);
                        if delay == 0 {
                            start_now = true;
                        } else {
                            self.pending_auto_start = Some(delay);
                        }
                        out.push(AppEvent::StepAdvanced {
                            index,
                            kind: step.kind,
                            minutes: step.minutes,
                        });
                        out.push(AppEvent::Notification {
                            title: "Next up".into(),
                            body: format!("{} {} min", step.kind, step.minutes),
                        });
                        out.push(AppEvent::TimerArmed {
                            minutes: step.minutes,
                        });
                        out.push(AppEvent::AccentChanged { kind: step.kind });
                    }
                    None => {
                        seq.stop();
                        let (minutes, kind) = seq
                            .first()
                            .map(|s| (s.minutes, s.kind))
                            .unwrap_or((fallback_min, SessionKind::Work));
                        self.timer.set_time(minutes);
                        out.push(AppEvent::Notification {
                            title: "Plan complete".into(),
                            body: "You finished everything on the plan.".into(),
                        });
                        out.push(AppEvent::PlanCompleted);
                        out.push(AppEvent::TimerArmed { minutes });
                        out.push(AppEvent::AccentChanged { kind });
                        out.push(AppEvent::StatusChanged {
                            label: StatusLabel::ReadyForPlan,
                        });
                        out.push(AppEvent::InputsEnabled { enabled: true });
                    }
                }
            }
        }

        if start_now {
            let events = self.start();
            out.extend(events);
        }
    }

    /// Keep the armed duration and accent synced to the plan's first (or
    /// current) step while not actively counting down.
    fn seed_plan_preview(&mut self) -> Vec<AppEvent> {
        let (minutes, kind) = match &self.mode {
            AppMode::Plan { seq, .. } => seq
                .current()
                .or_else(|| seq.first())
                .map(|s| (s.minutes, s.kind))
                .unwrap_or((self.config.timer.plan_fallback_min, SessionKind::Work)),
            AppMode::Single { .. } => return Vec::new(),
        };
        self.timer.set_time(minutes);
        vec![
            AppEvent::TimerArmed { minutes },
            AppEvent::AccentChanged { kind },
        ]
    }

    fn persist_plan(&mut self, now: Instant) {
        let steps = match &self.mode {
            AppMode::Plan { seq, .. } => seq.steps().to_vec(),
            AppMode::Single { .. } => return,
        };
        self.store.set_plan_list(steps, now);
    }
}

fn validate_minutes(minutes: u32) -> Result<(), ValidationError> {
    if (MIN_PRESET_MIN..=MAX_PRESET_MIN).contains(&minutes) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "minutes".into(),
            message: format!("must be {MIN_PRESET_MIN}..={MAX_PRESET_MIN}"),
        })
    }
}

fn not_in_plan_mode() -> ValidationError {
    ValidationError::InvalidValue {
        field: "app_mode".into(),
        message: "plan edits apply in plan mode".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(
            dir.path().join("data.json"),
            chrono::NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        );
        let app = App::new(store, AppConfig::default());
        (dir, app)
    }

    fn drive(app: &mut App, ticks: u32) -> Vec<AppEvent> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(app.tick(Instant::now()));
        }
        all
    }

    fn completions(events: &[AppEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, AppEvent::SessionCompleted { .. }))
            .count()
    }

    #[test]
    fn single_work_session_records_stats() {
        let (_dir, mut app) = scratch_app();
        app.start();
        let events = drive(&mut app, 25 * 60);
        assert_eq!(completions(&events), 1);
        assert_eq!(app.stats().today_count, 1);
        assert_eq!(app.stats().total_minutes, 25);
        // Quiescent afterwards.
        assert!(drive(&mut app, 10).is_empty());
        assert_eq!(app.stats().today_count, 1);
    }

    #[test]
    fn single_break_session_records_nothing() {
        let (_dir, mut app) = scratch_app();
        app.set_mode(SessionKind::Break).unwrap();
        app.start();
        let events = drive(&mut app, 5 * 60);
        assert_eq!(completions(&events), 1);
        assert_eq!(app.stats().today_count, 0);
        assert_eq!(app.stats().total_minutes, 0);
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Notification { title, .. } if title == "Break over"
        )));
    }

    #[test]
    fn mode_change_vetoed_while_running() {
        let (_dir, mut app) = scratch_app();
        app.start();
        assert!(matches!(
            app.set_mode(SessionKind::Break),
            Err(ValidationError::Busy(_))
        ));
        // Single-mode timer keeps its duration.
        assert_eq!(app.timer().total_secs(), 25 * 60);
    }

    #[test]
    fn same_kind_set_mode_reports_one_change() {
        let (_dir, mut app) = scratch_app();
        let events = app.set_mode(SessionKind::Work).unwrap();
        let changes = events
            .iter()
            .filter(|e| matches!(e, AppEvent::ModeChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn status_label_contract_table() {
        let (_dir, mut app) = scratch_app();
        assert_eq!(app.status_label(), StatusLabel::ReadyToFocus);
        app.start();
        assert_eq!(app.status_label(), StatusLabel::Focusing);
        app.pause();
        assert_eq!(app.status_label(), StatusLabel::Paused);
        app.reset();

        app.set_mode(SessionKind::Break).unwrap();
        assert_eq!(app.status_label(), StatusLabel::ReadyToRest);
        app.start();
        assert_eq!(app.status_label(), StatusLabel::Resting);
        app.reset();

        app.set_mode(SessionKind::Work).unwrap();
        app.set_app_mode(TopMode::Plan).unwrap();
        assert_eq!(app.status_label(), StatusLabel::ReadyForPlan);
    }

    #[test]
    fn plan_run_advances_and_auto_starts() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        app.plan_add(25, SessionKind::Work, Instant::now()).unwrap();
        app.plan_add(5, SessionKind::Break, Instant::now()).unwrap();

        app.start();
        let status = app.plan_status().unwrap();
        assert!(status.is_running);
        assert_eq!(status.cursor, 0);
        assert_eq!(app.timer().total_secs(), 25 * 60);

        // First step runs out: advance is announced, timer rearmed to 5
        // minutes, auto-start pending.
        let events = drive(&mut app, 25 * 60);
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::StepAdvanced { index: 1, kind: SessionKind::Break, minutes: 5 }
        )));
        assert_eq!(app.stats().today_count, 1);
        assert_eq!(app.stats().total_minutes, 25);
        assert_eq!(app.timer().total_secs(), 5 * 60);
        assert!(app.auto_start_pending());
        assert!(!app.timer().is_running());

        // One grace tick later the break starts by itself.
        drive(&mut app, 1);
        assert!(app.timer().is_running());

        // Break completes: no stat, plan finishes.
        let events = drive(&mut app, 5 * 60);
        assert!(events.iter().any(|e| matches!(e, AppEvent::PlanCompleted)));
        assert_eq!(app.stats().today_count, 1);
        assert_eq!(app.stats().total_minutes, 25);
        let status = app.plan_status().unwrap();
        assert!(!status.is_running);
        assert_eq!(status.cursor, -1);
        // Preview re-seeded from the first step.
        assert_eq!(app.timer().total_secs(), 25 * 60);
    }

    #[test]
    fn pause_in_grace_window_cancels_auto_start() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        app.plan_add(1, SessionKind::Work, Instant::now()).unwrap();
        app.plan_add(1, SessionKind::Break, Instant::now()).unwrap();

        app.start();
        drive(&mut app, 60);
        assert!(app.auto_start_pending());

        app.pause();
        assert!(!app.auto_start_pending());
        drive(&mut app, 10);
        assert!(!app.timer().is_running());
        // The next step stays armed; a manual start resumes the plan.
        assert_eq!(app.timer().total_secs(), 60);
        app.start();
        assert!(app.timer().is_running());
        assert_eq!(app.plan_status().unwrap().cursor, 1);
    }

    #[test]
    fn plan_edits_gated_while_running() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        app.plan_add(25, SessionKind::Work, Instant::now()).unwrap();
        app.plan_add(5, SessionKind::Break, Instant::now()).unwrap();
        app.start();

        assert!(matches!(
            app.plan_delete(0, Instant::now()),
            Err(ValidationError::Busy(_))
        ));
        assert!(matches!(
            app.plan_reorder(0, 1, Instant::now()),
            Err(ValidationError::Busy(_))
        ));
        assert!(matches!(
            app.plan_add(10, SessionKind::Work, Instant::now()),
            Err(ValidationError::Busy(_))
        ));
    }

    #[test]
    fn plan_add_validates_range() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        assert!(app.plan_add(0, SessionKind::Work, Instant::now()).is_err());
        assert!(app
            .plan_add(121, SessionKind::Work, Instant::now())
            .is_err());
        assert!(app.plan_add(120, SessionKind::Work, Instant::now()).is_ok());
    }

    #[test]
    fn entering_plan_mode_seeds_from_first_step() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        // Empty list: fallback duration.
        assert_eq!(app.timer().total_secs(), 25 * 60);

        app.plan_add(10, SessionKind::Break, Instant::now()).unwrap();
        // First-item preview re-arms the timer.
        assert_eq!(app.timer().total_secs(), 10 * 60);

        // Back to single restores the mode default.
        app.set_app_mode(TopMode::Single).unwrap();
        assert_eq!(app.timer().total_secs(), 25 * 60);
        assert_eq!(app.top_mode(), TopMode::Single);
    }

    #[test]
    fn app_mode_switch_vetoed_while_running() {
        let (_dir, mut app) = scratch_app();
        app.start();
        assert!(matches!(
            app.set_app_mode(TopMode::Plan),
            Err(ValidationError::Busy(_))
        ));
    }

    #[test]
    fn reset_aborts_a_plan_run() {
        let (_dir, mut app) = scratch_app();
        app.set_app_mode(TopMode::Plan).unwrap();
        app.plan_add(25, SessionKind::Work, Instant::now()).unwrap();
        app.start();
        drive(&mut app, 30);

        app.reset();
        let status = app.plan_status().unwrap();
        assert!(!status.is_running);
        assert_eq!(status.cursor, -1);
        assert_eq!(app.timer().remaining_secs(), 25 * 60);
        assert_eq!(app.status_label(), StatusLabel::ReadyForPlan);
    }

    #[test]
    fn preset_edits_gated_while_running() {
        let (_dir, mut app) = scratch_app();
        app.start();
        assert!(matches!(
            app.add_preset(SessionKind::Work, 30),
            Err(ValidationError::Busy(_))
        ));
        app.pause();
        assert!(app.add_preset(SessionKind::Work, 30).unwrap());
        assert!(!app.add_preset(SessionKind::Work, 30).unwrap());
    }

    #[test]
    fn toggle_round_trip() {
        let (_dir, mut app) = scratch_app();
        app.toggle();
        assert!(app.timer().is_running());
        app.toggle();
        assert!(!app.timer().is_running());
        assert_eq!(app.status_label(), StatusLabel::Paused);
    }
}
