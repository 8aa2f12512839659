//! Overlap grouping for stacked rendering.
//!
//! This module provides:
//! - Task intervals with midnight-crossing semantics
//! - Clustering of a day's intervals into overlap groups
//! - Lane assignment inside a group
//! - A memoizing cache that recomputes only when the task set changes

mod cache;
mod group;
mod interval;
mod lane;

pub use cache::OverlapCache;
pub use group::{group_overlaps, OverlapGroup};
pub use interval::TaskInterval;
pub use lane::{assign_lanes, lane_count, LaneAssignment};
