//! Plan sequencer: an ordered, user-editable list of timed steps with a
//! cursor that advances on each completed countdown.
//!
//! The sequencer owns list consistency (cursor clamping, bounds checks).
//! Gating edits against an active run is the orchestrator's job; see
//! `App::plan_delete` and friends, which return `Busy`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::mode::SessionKind;

/// One (duration, kind) unit in the plan. Identity is the `id`, not the
/// position - positions change under reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub id: Uuid,
    pub minutes: u32,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl PlanStep {
    pub fn new(minutes: u32, kind: SessionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            minutes,
            kind,
        }
    }
}

/// Snapshot of the sequencer for the shell.
///
/// `cursor` is `-1` while idle, mirroring the persisted UI contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStatus {
    pub is_running: bool,
    pub cursor: i64,
    pub total: usize,
    pub current: Option<PlanStep>,
    pub remaining: usize,
}

/// Ordered step list plus execution cursor.
#[derive(Debug, Clone, Default)]
pub struct PlanSequencer {
    steps: Vec<PlanStep>,
    cursor: Option<usize>,
    is_running: bool,
}

impl PlanSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted step list (cursor idle).
    pub fn from_steps(steps: Vec<PlanStep>) -> Self {
        Self {
            steps,
            cursor: None,
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn current(&self) -> Option<&PlanStep> {
        self.cursor.and_then(|i| self.steps.get(i))
    }

    pub fn first(&self) -> Option<&PlanStep> {
        self.steps.first()
    }

    pub fn status(&self) -> PlanStatus {
        let cursor = self.cursor.map(|i| i as i64).unwrap_or(-1);
        PlanStatus {
            is_running: self.is_running,
            cursor,
            total: self.steps.len(),
            current: self.current().cloned(),
            remaining: (self.steps.len() as i64 - cursor - 1).max(0) as usize,
        }
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Append a step with a fresh id and return it.
    ///
    /// No upper bound on list length; `minutes` is validated by the caller
    /// (the UI contract is 1..=120).
    pub fn add_item(&mut self, minutes: u32, kind: SessionKind) -> PlanStep {
        let step = PlanStep::new(minutes, kind);
        self.steps.push(step.clone());
        step
    }

    /// Remove by position.
    ///
    /// If the cursor falls off the end of the shrunk list it is clamped to
    /// the new last index (idle on an emptied list), so `cursor < len`
    /// always holds while running.
    pub fn delete_item(&mut self, index: usize) -> Result<PlanStep, ValidationError> {
        if index >= self.steps.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "plan".into(),
                index,
                len: self.steps.len(),
            });
        }
        let removed = self.steps.remove(index);
        if let Some(cursor) = self.cursor {
            if cursor >= self.steps.len() {
                self.cursor = self.steps.len().checked_sub(1);
            }
        }
        Ok(removed)
    }

    /// Splice-move a step from one position to another.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        let len = self.steps.len();
        if from >= len {
            return Err(ValidationError::OutOfBounds {
                collection: "plan".into(),
                index: from,
                len,
            });
        }
        if to >= len {
            return Err(ValidationError::OutOfBounds {
                collection: "plan".into(),
                index: to,
                len,
            });
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        Ok(())
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Begin executing the plan from the first step.
    ///
    /// Returns `None` on an empty list, leaving the sequencer idle.
    pub fn start(&mut self) -> Option<&PlanStep> {
        if self.steps.is_empty() {
            return None;
        }
        self.is_running = true;
        self.cursor = Some(0);
        self.steps.first()
    }

    /// Advance the cursor.
    ///
    /// In bounds: returns the new current step. Past the end: the plan is
    /// finished - the sequencer drops back to idle and returns `None`.
    pub fn next(&mut self) -> Option<PlanStep> {
        let next = self.cursor.map(|i| i + 1).unwrap_or(0);
        if next < self.steps.len() {
            self.cursor = Some(next);
            self.steps.get(next).cloned()
        } else {
            self.is_running = false;
            self.cursor = None;
            None
        }
    }

    /// Manual abort: force-idle regardless of position.
    pub fn stop(&mut self) {
        self.is_running = false;
        self.cursor = None;
    }
}
