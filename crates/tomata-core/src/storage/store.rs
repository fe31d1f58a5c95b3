//! Single-document JSON data store.
//!
//! Everything the app persists - stats, presets, the plan list - lives in
//! one JSON file. Stat and preset mutations write through immediately so a
//! completed session survives an abrupt close; plan-list edits are
//! debounced, collapsing bursts of drag-reorder writes into one.
//!
//! Load failures never surface: the store falls back to an in-memory
//! default document and retries the write on the next mutation.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::plan::PlanStep;
use crate::presets::PresetSet;
use crate::stats::Stats;

/// Quiet period before a debounced write lands.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// The persisted document. Key names are the on-disk contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub stats: Stats,
    pub presets: PresetSet,
    #[serde(rename = "planList", default)]
    pub plan_list: Vec<PlanStep>,
}

impl Document {
    fn new(today: NaiveDate) -> Self {
        Self {
            stats: Stats::new(today),
            presets: PresetSet::default(),
            plan_list: Vec::new(),
        }
    }
}

/// Owns the document, its path, and the debounce clock.
///
/// Single-threaded by design: the host loop passes `Instant::now()` into
/// the mutation and flush entry points, which keeps debounce behavior
/// deterministic under test.
#[derive(Debug)]
pub struct DataStore {
    path: PathBuf,
    doc: Document,
    dirty_since: Option<Instant>,
}

impl DataStore {
    /// Open the store at `path`, applying the day rollover.
    ///
    /// Never fails: an unreadable or unparsable file falls back to the
    /// default document (logged); the write is retried on the next
    /// mutation rather than immediately.
    pub fn open(path: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let path = path.into();
        let doc = match Self::read_document(&path) {
            Ok(Some(doc)) => doc,
            Ok(None) => Document::new(today),
            Err(e) => {
                warn!("falling back to default data document: {e}");
                Document::new(today)
            }
        };

        let mut store = Self {
            path,
            doc,
            dirty_since: None,
        };
        if store.doc.stats.rollover(today) {
            // New calendar day: persist the reset count right away.
            store.save_now();
        }
        store
    }

    /// Open at the default location (`data_dir()/data.json`).
    pub fn open_default(today: NaiveDate) -> Result<Self, StorageError> {
        let dir = super::data_dir().map_err(|e| StorageError::ReadFailed {
            path: PathBuf::from("data.json"),
            message: e.to_string(),
        })?;
        Ok(Self::open(dir.join("data.json"), today))
    }

    fn read_document(path: &Path) -> Result<Option<Document>, StorageError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn stats(&self) -> &Stats {
        &self.doc.stats
    }

    pub fn presets(&self) -> &PresetSet {
        &self.doc.presets
    }

    pub fn plan_list(&self) -> &[PlanStep] {
        &self.doc.plan_list
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Record a completed work session; writes through immediately.
    pub fn record_session(&mut self, minutes: u32) {
        self.doc.stats.record(minutes);
        self.save_now();
    }

    /// Mutate the preset lists; writes through immediately.
    pub fn update_presets(&mut self, f: impl FnOnce(&mut PresetSet)) {
        f(&mut self.doc.presets);
        self.save_now();
    }

    /// Replace the persisted plan list; debounced.
    pub fn set_plan_list(&mut self, steps: Vec<PlanStep>, now: Instant) {
        self.doc.plan_list = steps;
        self.mark_dirty(now);
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn mark_dirty(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    /// Write the pending debounced change once the quiet period elapsed.
    /// Returns true if a write landed.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.duration_since(since) >= DEBOUNCE => self.save_now(),
            _ => false,
        }
    }

    /// Write any pending change unconditionally.
    pub fn flush(&mut self) {
        if self.dirty_since.is_some() {
            self.save_now();
        }
    }

    /// Best-effort write; failures are logged and the document stays
    /// dirty so the next mutation retries.
    fn save_now(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => {
                self.dirty_since = None;
                debug!(path = %self.path.display(), "data document written");
                true
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    fn try_save(&self) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(&self.doc).map_err(|e| StorageError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
