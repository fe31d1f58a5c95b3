//! Daily usage statistics.
//!
//! `today_count` is scoped to one calendar day and resets on rollover;
//! `total_minutes` is monotonic across days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Calendar day the `today_count` belongs to (ISO `YYYY-MM-DD`).
    pub date: NaiveDate,
    pub today_count: u32,
    pub total_minutes: u64,
}

impl Stats {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            today_count: 0,
            total_minutes: 0,
        }
    }

    /// Record one completed work session of `minutes`.
    pub fn record(&mut self, minutes: u32) {
        self.today_count += 1;
        self.total_minutes += minutes as u64;
    }

    /// Advance to `today` if the calendar day changed.
    ///
    /// Resets the daily count, preserves the all-time minutes. Returns
    /// true when a rollover happened (callers persist immediately).
    pub fn rollover(&mut self, today: NaiveDate) -> bool {
        if self.date == today {
            return false;
        }
        self.date = today;
        self.today_count = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn record_bumps_both_counters() {
        let mut stats = Stats::new(day("2026-08-07"));
        stats.record(25);
        stats.record(45);
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.total_minutes, 70);
    }

    #[test]
    fn rollover_resets_today_preserves_total() {
        let mut stats = Stats::new(day("2026-08-06"));
        stats.record(25);
        assert!(stats.rollover(day("2026-08-07")));
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.total_minutes, 25);
        assert_eq!(stats.date, day("2026-08-07"));
    }

    #[test]
    fn rollover_same_day_is_noop() {
        let mut stats = Stats::new(day("2026-08-07"));
        stats.record(25);
        assert!(!stats.rollover(day("2026-08-07")));
        assert_eq!(stats.today_count, 1);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = Stats::new(day("2026-08-07"));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["date"], "2026-08-07");
        assert_eq!(json["todayCount"], 0);
        assert_eq!(json["totalMinutes"], 0);
    }
}
