//! # Dayring Core Library
//!
//! This library provides the coordinate mapping behind the Dayring 24-hour
//! circular schedule. Rendering, persistence of tasks and gesture handling
//! live in the caller; this crate only decides *where* a time or interval
//! lands.
//!
//! ## Architecture
//!
//! - **Clock**: Pure conversions between wall-clock time and ring angle under
//!   a user-configurable rotation offset, including midnight wraparound
//! - **Overlap**: Order-independent clustering of a day's task intervals for
//!   stacked rendering, with lane assignment and memoization
//! - **Timeline**: Placement of the live "now" indicator on a non-uniform
//!   vertical timeline from anchor points measured by the renderer
//! - **Storage**: TOML-based configuration, with changes reported as explicit
//!   events rather than broadcast
//!
//! ## Key Components
//!
//! - [`time_to_angle`] / [`angle_to_time`]: Ring angle mapping
//! - [`group_overlaps`]: Overlap clustering
//! - [`AnchorSnapshot`]: Immutable anchor set and position interpolation
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod overlap;
pub mod storage;
pub mod timeline;

pub use clock::{
    angle_to_time, angle_to_time_snapped, apply_rotation_offset, arc_for, hour_marks,
    minutes_since_midnight, normalize_degrees, normalize_minutes, time_of_day_to_angle,
    time_to_angle, ArcSpan, DayAnchor, RotationOffset,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{ConfigDispatcher, ConfigEvent, ConfigObserver, RingSettings};
pub use overlap::{
    assign_lanes, group_overlaps, LaneAssignment, OverlapCache, OverlapGroup, TaskInterval,
};
pub use storage::Config;
pub use timeline::{AnchorPoint, AnchorSnapshot, BlockSpan, Placement, PlacementTier, SnapshotParts};
