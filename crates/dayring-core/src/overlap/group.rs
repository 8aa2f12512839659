//! Overlap clustering of a day's intervals.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interval::TaskInterval;

/// A cluster of two or more intervals linked by overlap.
///
/// Members are ordered by start time, ties broken by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapGroup {
    members: Vec<TaskInterval>,
}

impl OverlapGroup {
    pub fn members(&self) -> &[TaskInterval] {
        &self.members
    }

    pub fn ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Earliest start and latest effective end across the group.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.members.iter().map(|m| m.start).min()?;
        let end = self.members.iter().map(TaskInterval::effective_end).max()?;
        Some((start, end))
    }
}

/// Partition intervals into overlap groups.
///
/// Intervals are sorted by (start, id), then each unassigned interval seeds
/// a group and absorbs every unassigned interval that overlaps the seed
/// itself. Overlap is not chased transitively: an interval that only touches
/// a later member stays free to seed its own group. Groups of one are
/// dropped; the caller renders those unstacked. Ids are unique, so the sort
/// is total and the result depends only on the input set, not its order.
///
/// Quadratic in the number of intervals, which stays small for one day.
pub fn group_overlaps(intervals: &[TaskInterval]) -> Vec<OverlapGroup> {
    let mut sorted: Vec<&TaskInterval> = intervals.iter().collect();
    sorted.sort_by(|a, b| a.canonical_cmp(b));

    let mut assigned = vec![false; sorted.len()];
    let mut groups = Vec::new();

    for seed in 0..sorted.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        for (candidate, interval) in sorted.iter().enumerate() {
            if !assigned[candidate] && sorted[seed].overlaps(interval) {
                assigned[candidate] = true;
                members.push(candidate);
            }
        }

        if members.len() < 2 {
            continue;
        }
        members.sort_unstable();
        groups.push(OverlapGroup {
            members: members.into_iter().map(|i| sorted[i].clone()).collect(),
        });
    }

    debug!(
        intervals = intervals.len(),
        groups = groups.len(),
        "grouped overlapping intervals"
    );
    groups
}
