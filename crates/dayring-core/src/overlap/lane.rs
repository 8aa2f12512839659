//! Lane assignment for stacked rendering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::group::OverlapGroup;

/// Which stacking lane a grouped interval is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    pub id: String,
    pub lane: usize,
}

/// First-fit lanes: each member takes the lowest lane whose previous
/// occupant has ended by the member's start.
pub fn assign_lanes(group: &OverlapGroup) -> Vec<LaneAssignment> {
    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut assignments = Vec::with_capacity(group.len());

    for member in group.members() {
        let end = member.effective_end();
        let lane = match lane_ends.iter().position(|&busy_until| busy_until <= member.start) {
            Some(free) => {
                lane_ends[free] = end;
                free
            }
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
        assignments.push(LaneAssignment {
            id: member.id.clone(),
            lane,
        });
    }

    assignments
}

/// Number of lanes a set of assignments needs.
pub fn lane_count(assignments: &[LaneAssignment]) -> usize {
    assignments.iter().map(|a| a.lane + 1).max().unwrap_or(0)
}
