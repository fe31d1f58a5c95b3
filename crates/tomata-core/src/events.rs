use serde::{Deserialize, Serialize};

use crate::mode::SessionKind;

/// Lifecycle events produced by the countdown state machine.
///
/// One typed variant per transition; the orchestration layer is the sole
/// consumer and fans them out into [`AppEvent`]s for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    Started { total_secs: u32 },
    Paused { remaining_secs: u32 },
    Reset,
    Tick { remaining_secs: u32 },
    Completed,
}

/// User-facing status label.
///
/// The mapping from (top-level mode, session kind, timer state) to label
/// is a contract; see `App::status_label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Focusing,
    Resting,
    Paused,
    ReadyToFocus,
    ReadyToRest,
    ReadyForPlan,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Focusing => "focusing",
            StatusLabel::Resting => "resting",
            StatusLabel::Paused => "paused",
            StatusLabel::ReadyToFocus => "ready to focus",
            StatusLabel::ReadyToRest => "ready to rest",
            StatusLabel::ReadyForPlan => "ready for plan",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level application mode selector, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopMode {
    Single,
    Plan,
}

/// Events emitted by the orchestration layer for the UI/CLI shell.
///
/// The shell renders these; it never reaches back into module internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The user-facing status line changed.
    StatusChanged { label: StatusLabel },
    /// Preset / plan-add controls accept input (false while a run is active).
    InputsEnabled { enabled: bool },
    /// Work/break mode changed in single mode; the shell refreshes the
    /// preset list shown for the new kind.
    ModeChanged { kind: SessionKind },
    /// Switched between single and plan top-level modes.
    AppModeChanged { mode: TopMode },
    /// The countdown was (re)armed with a new duration.
    TimerArmed { minutes: u32 },
    /// Ambient color scheme follows this kind.
    AccentChanged { kind: SessionKind },
    /// Desktop notification to surface (title + body).
    Notification { title: String, body: String },
    /// A single-mode session ran to completion.
    SessionCompleted { kind: SessionKind, minutes: u32 },
    /// Plan advanced to the step at `index`; an auto-start is pending.
    StepAdvanced {
        index: usize,
        kind: SessionKind,
        minutes: u32,
    },
    /// Every plan step finished; the sequencer is idle again.
    PlanCompleted,
}
