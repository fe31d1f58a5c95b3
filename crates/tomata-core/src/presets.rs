//! User-defined duration presets, one sorted unique list per session kind.

use serde::{Deserialize, Serialize};

use crate::mode::SessionKind;

/// Valid preset range in minutes (UI contract).
pub const MIN_PRESET_MIN: u32 = 1;
pub const MAX_PRESET_MIN: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSet {
    work: Vec<u32>,
    #[serde(rename = "break")]
    break_: Vec<u32>,
}

impl Default for PresetSet {
    fn default() -> Self {
        Self {
            work: vec![15, 25, 45, 60],
            break_: vec![5, 10, 15],
        }
    }
}

impl PresetSet {
    pub fn list(&self, kind: SessionKind) -> &[u32] {
        match kind {
            SessionKind::Work => &self.work,
            SessionKind::Break => &self.break_,
        }
    }

    fn list_mut(&mut self, kind: SessionKind) -> &mut Vec<u32> {
        match kind {
            SessionKind::Work => &mut self.work,
            SessionKind::Break => &mut self.break_,
        }
    }

    /// Insert keeping ascending order.
    ///
    /// Returns false (no change) for out-of-range minutes or duplicates.
    pub fn add(&mut self, kind: SessionKind, minutes: u32) -> bool {
        if !(MIN_PRESET_MIN..=MAX_PRESET_MIN).contains(&minutes) {
            return false;
        }
        let list = self.list_mut(kind);
        match list.binary_search(&minutes) {
            Ok(_) => false,
            Err(pos) => {
                list.insert(pos, minutes);
                true
            }
        }
    }

    /// Remove a preset; false if it was not present.
    pub fn remove(&mut self, kind: SessionKind, minutes: u32) -> bool {
        let list = self.list_mut(kind);
        match list.binary_search(&minutes) {
            Ok(pos) => {
                list.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}
