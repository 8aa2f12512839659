//! Arc spans and hour ticks on the ring.

use serde::{Deserialize, Serialize};

use super::angle::{normalize_degrees, time_to_angle, RotationOffset, DEGREES_PER_HOUR};
use crate::overlap::TaskInterval;

/// The portion of the ring an interval occupies, drawn clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    pub start_degrees: f64,
    /// Clockwise extent in [0, 360]
    pub sweep_degrees: f64,
}

impl ArcSpan {
    /// Angle where the arc ends, wrapped into [0, 360).
    pub fn end_degrees(&self) -> f64 {
        normalize_degrees(self.start_degrees + self.sweep_degrees)
    }

    /// Whether `degrees` falls on the arc (start inclusive, end exclusive).
    pub fn contains(&self, degrees: f64) -> bool {
        if self.sweep_degrees >= 360.0 {
            return true;
        }
        normalize_degrees(degrees - self.start_degrees) < self.sweep_degrees
    }
}

/// Arc covered by a task interval.
///
/// Intervals whose end precedes their start cross midnight; intervals of a
/// full day or longer cover the whole ring.
pub fn arc_for(interval: &TaskInterval, offset: RotationOffset) -> ArcSpan {
    let start_degrees = time_to_angle(&interval.start, offset);
    let minutes = interval.duration().num_seconds() as f64 / 60.0;
    ArcSpan {
        start_degrees,
        sweep_degrees: (minutes / 4.0).clamp(0.0, 360.0),
    }
}

/// Ring angle of each hour tick, index = hour.
pub fn hour_marks(offset: RotationOffset) -> [f64; 24] {
    let shift = offset.shift();
    std::array::from_fn(|hour| normalize_degrees(hour as f64 * DEGREES_PER_HOUR - shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn arc_sweeps_a_quarter_degree_per_minute() {
        let task = TaskInterval::new("a", at(9, 0), at(10, 30));
        let arc = arc_for(&task, RotationOffset::new(90.0).unwrap());
        assert_eq!(arc.start_degrees, 135.0);
        assert_eq!(arc.sweep_degrees, 22.5);
        assert_eq!(arc.end_degrees(), 157.5);
    }

    #[test]
    fn arc_across_midnight_wraps_end() {
        let task = TaskInterval::new("late", at(23, 0), at(1, 0));
        let arc = arc_for(&task, RotationOffset::new(90.0).unwrap());
        assert_eq!(arc.start_degrees, 345.0);
        assert_eq!(arc.sweep_degrees, 30.0);
        assert_eq!(arc.end_degrees(), 15.0);
        assert!(arc.contains(0.0));
        assert!(arc.contains(350.0));
        assert!(!arc.contains(15.0));
        assert!(!arc.contains(180.0));
    }

    #[test]
    fn hour_marks_follow_offset() {
        let marks = hour_marks(RotationOffset::new(90.0).unwrap());
        assert_eq!(marks[0], 0.0);
        assert_eq!(marks[6], 90.0);
        assert_eq!(marks[23], 345.0);

        let marks = hour_marks(RotationOffset::ZERO);
        assert_eq!(marks[0], 270.0);
        assert_eq!(marks[6], 0.0);
    }

    #[test]
    fn hour_marks_agree_with_time_to_angle() {
        let offset = RotationOffset::new(33.0).unwrap();
        let marks = hour_marks(offset);
        for (hour, mark) in marks.iter().enumerate() {
            let expected = time_to_angle(&at(hour as u32, 0), offset);
            assert!((mark - expected).abs() < 1e-9, "hour {hour}");
        }
    }
}
