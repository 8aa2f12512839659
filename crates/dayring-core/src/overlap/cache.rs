//! Memoized overlap grouping.

use chrono::NaiveDateTime;
use tracing::trace;

use super::group::{group_overlaps, OverlapGroup};
use super::interval::TaskInterval;

type IntervalKey = (String, NaiveDateTime, NaiveDateTime);

/// Holds the groups of the last task set seen.
///
/// The renderer calls [`groups_for`](Self::groups_for) on every tick; the
/// grouping only reruns when the set of (id, start, end) triples changes.
/// Input order and category changes do not invalidate the cache.
#[derive(Debug, Default)]
pub struct OverlapCache {
    key: Option<Vec<IntervalKey>>,
    groups: Vec<OverlapGroup>,
    recomputes: u64,
}

impl OverlapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups for `intervals`, recomputed only if the set changed.
    pub fn groups_for(&mut self, intervals: &[TaskInterval]) -> &[OverlapGroup] {
        let key = Self::key_of(intervals);
        if self.key.as_ref() == Some(&key) {
            trace!("overlap cache hit");
        } else {
            trace!(intervals = intervals.len(), "overlap cache miss");
            self.groups = group_overlaps(intervals);
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.groups
    }

    /// Forget the cached set so the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.groups.clear();
    }

    /// Number of times grouping actually ran.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    fn key_of(intervals: &[TaskInterval]) -> Vec<IntervalKey> {
        let mut key: Vec<IntervalKey> = intervals
            .iter()
            .map(|i| (i.id.clone(), i.start, i.end))
            .collect();
        key.sort();
        key
    }
}
