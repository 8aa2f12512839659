//! Task interval type.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A task's time range on the ring.
///
/// Owned by the task store; the core only reads it. An `end` earlier than
/// `start` means the task crosses midnight and really ends 24 hours later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskInterval {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub category: Option<String>,
}

impl TaskInterval {
    /// Create a new interval without a category
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            category: None,
        }
    }

    /// Set the category reference
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the interval wraps past midnight
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// End of the interval with midnight crossing resolved
    pub fn effective_end(&self) -> NaiveDateTime {
        if self.crosses_midnight() {
            self.end + Duration::hours(24)
        } else {
            self.end
        }
    }

    pub fn duration(&self) -> Duration {
        self.effective_end() - self.start
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Open-interval intersection: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.effective_end() && self.effective_end() > other.start
    }

    /// Canonical ordering used for grouping: start time, then id.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn midnight_crossing_extends_end_by_a_day() {
        let task = TaskInterval::new("night", at(23, 0), at(1, 0));
        assert!(task.crosses_midnight());
        assert_eq!(task.effective_end(), at(1, 0) + Duration::hours(24));
        assert_eq!(task.duration_minutes(), 120);
    }

    #[test]
    fn overlap_uses_open_intervals() {
        let a = TaskInterval::new("a", at(9, 0), at(10, 0));
        let b = TaskInterval::new("b", at(9, 30), at(10, 30));
        let c = TaskInterval::new("c", at(10, 0), at(11, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn midnight_task_overlaps_late_evening_task() {
        let night = TaskInterval::new("night", at(23, 0), at(1, 0));
        let evening = TaskInterval::new("evening", at(23, 30), at(23, 45));
        assert!(night.overlaps(&evening));
    }

    #[test]
    fn category_is_optional_in_json() {
        let json = r#"{"id":"t1","start":"2024-01-01T09:00:00","end":"2024-01-01T10:00:00"}"#;
        let task: TaskInterval = serde_json::from_str(json).unwrap();
        assert_eq!(task.category, None);
        assert_eq!(task.duration_minutes(), 60);
    }
}
