//! Circular time mapping.
//!
//! This module provides:
//! - Conversion between time-of-day and ring angle under a rotation offset
//! - Rotation of bare instants by the offset, preserving their date
//! - Arc spans for task intervals and hour tick angles

mod angle;
mod arc;

pub use angle::{
    angle_to_time, angle_to_time_snapped, apply_rotation_offset, minutes_since_midnight,
    normalize_degrees, normalize_minutes, time_of_day_to_angle, time_to_angle, DayAnchor,
    RotationOffset, DEGREES_PER_HOUR, MINUTES_PER_DAY,
};
pub use arc::{arc_for, hour_marks, ArcSpan};
