//! Time-of-day to ring angle conversion.
//!
//! The ring is a 24-hour dial: 1440 minutes map onto 360 degrees, so one
//! minute is a quarter degree and one hour is 15 degrees. Hour 0 is drawn at
//! the top of the ring when the rotation offset is 90 degrees; the offset
//! rotates the whole dial.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in one ring revolution.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Degrees covered by one hour on a 24-hour dial.
pub const DEGREES_PER_HOUR: f64 = 15.0;

const DEGREES_PER_MINUTE: f64 = 360.0 / MINUTES_PER_DAY;
const MINUTES_PER_DEGREE: f64 = MINUTES_PER_DAY / 360.0;
const SECONDS_PER_DEGREE: f64 = 240.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Drawing convention: angle 0 sits 90 degrees away from the visual top.
/// Changing this requires flipping the renderer's draw convention too.
const TOP_OF_RING_DEGREES: f64 = 90.0;

/// Degrees locating hour 0 on the ring, always within [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RotationOffset(f64);

impl RotationOffset {
    /// Offset that leaves the dial unrotated.
    pub const ZERO: RotationOffset = RotationOffset(0.0);

    /// Validate and normalize a raw offset.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonFinite`] for NaN or infinite input.
    /// Finite values outside [0, 360) are wrapped, never rejected.
    pub fn new(degrees: f64) -> Result<Self, ValidationError> {
        let degrees = ValidationError::check_finite("rotation_offset", degrees)?;
        Ok(Self(normalize_degrees(degrees)))
    }

    /// The offset in degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Rotation applied to raw clock angles.
    pub(crate) fn shift(self) -> f64 {
        TOP_OF_RING_DEGREES - self.0
    }
}

impl TryFrom<f64> for RotationOffset {
    type Error = ValidationError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl From<RotationOffset> for f64 {
    fn from(offset: RotationOffset) -> Self {
        offset.0
    }
}

/// The calendar day a ring or timeline represents.
///
/// Angle math discards the date; the anchor reattaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayAnchor(NaiveDate);

impl DayAnchor {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Anchor on the date of an existing instant.
    pub fn of(instant: &NaiveDateTime) -> Self {
        Self(instant.date())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Combine the anchored date with a time-of-day.
    pub fn attach(self, time: NaiveTime) -> NaiveDateTime {
        self.0.and_time(time)
    }
}

impl From<NaiveDate> for DayAnchor {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Wrap any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Wrap any finite minute count into [0, 1440).
pub fn normalize_minutes(minutes: f64) -> f64 {
    wrap(minutes, MINUTES_PER_DAY)
}

fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    // rem_euclid rounds tiny negative inputs up to the modulus itself
    if wrapped >= modulus {
        0.0
    } else {
        wrapped
    }
}

/// Minutes elapsed since midnight, seconds included as a fraction.
pub fn minutes_since_midnight(time: NaiveTime) -> f64 {
    let seconds = f64::from(time.num_seconds_from_midnight());
    let nanos = f64::from(time.nanosecond().min(999_999_999));
    (seconds + nanos / 1e9) / 60.0
}

/// Ring angle of a bare time-of-day.
pub fn time_of_day_to_angle(time: NaiveTime, offset: RotationOffset) -> f64 {
    let minutes = normalize_minutes(minutes_since_midnight(time));
    normalize_degrees(minutes * DEGREES_PER_MINUTE - offset.shift())
}

/// Ring angle of an instant; only its time-of-day matters.
pub fn time_to_angle(instant: &NaiveDateTime, offset: RotationOffset) -> f64 {
    time_of_day_to_angle(instant.time(), offset)
}

/// Instant shown at `degrees` on the ring for the anchored day.
///
/// Out-of-range angles are wrapped. The time-of-day resolves to the nearest
/// whole second; a result of 24:00 wraps to 00:00 on the same date.
pub fn angle_to_time(degrees: f64, day: DayAnchor, offset: RotationOffset) -> NaiveDateTime {
    let minutes = normalize_minutes(degrees * MINUTES_PER_DEGREE + offset.shift() * MINUTES_PER_DEGREE);
    let seconds = (minutes * 60.0).round() as i64;
    day.attach(time_from_seconds(seconds))
}

/// Like [`angle_to_time`], rounding to the nearest `step_minutes`.
///
/// A step of 0 or 1 leaves the second-resolution result untouched.
pub fn angle_to_time_snapped(
    degrees: f64,
    day: DayAnchor,
    offset: RotationOffset,
    step_minutes: u32,
) -> NaiveDateTime {
    let instant = angle_to_time(degrees, day, offset);
    if step_minutes <= 1 {
        return instant;
    }

    let step = i64::from(step_minutes) * 60;
    let seconds = i64::from(instant.time().num_seconds_from_midnight());
    let snapped = (seconds + step / 2) / step * step;
    day.attach(time_from_seconds(snapped))
}

/// Shift only the time-of-day of `instant` by `offset / 15` hours.
///
/// The date is preserved even when the shift crosses midnight. `inverse`
/// shifts in the opposite direction, undoing a forward shift.
pub fn apply_rotation_offset(
    instant: &NaiveDateTime,
    offset: RotationOffset,
    inverse: bool,
) -> NaiveDateTime {
    let mut shift = (offset.degrees() * SECONDS_PER_DEGREE).round() as i64;
    if inverse {
        shift = -shift;
    }
    let seconds = i64::from(instant.time().num_seconds_from_midnight()) + shift;
    instant.date().and_time(time_from_seconds(seconds))
}

fn time_from_seconds(seconds: i64) -> NaiveTime {
    NaiveTime::MIN + Duration::seconds(seconds.rem_euclid(SECONDS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DayAnchor {
        DayAnchor::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().attach(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn offset(deg: f64) -> RotationOffset {
        RotationOffset::new(deg).unwrap()
    }

    #[test]
    fn offset_is_normalized() {
        assert_eq!(offset(370.0).degrees(), 10.0);
        assert_eq!(offset(-90.0).degrees(), 270.0);
        assert_eq!(offset(360.0).degrees(), 0.0);
    }

    #[test]
    fn offset_rejects_non_finite() {
        assert!(matches!(
            RotationOffset::new(f64::NAN),
            Err(ValidationError::NonFinite { .. })
        ));
        assert!(RotationOffset::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn midnight_sits_at_zero_with_quarter_turn_offset() {
        assert_eq!(time_to_angle(&at(0, 0), offset(90.0)), 0.0);
    }

    #[test]
    fn midnight_without_offset_wraps_instead_of_going_negative() {
        assert_eq!(time_to_angle(&at(0, 0), RotationOffset::ZERO), 270.0);
        assert_eq!(time_to_angle(&at(6, 0), RotationOffset::ZERO), 0.0);
        assert_eq!(time_to_angle(&at(12, 0), RotationOffset::ZERO), 90.0);
    }

    #[test]
    fn one_hour_is_fifteen_degrees() {
        let o = offset(90.0);
        assert_eq!(time_to_angle(&at(1, 0), o), 15.0);
        assert_eq!(time_to_angle(&at(23, 0), o), 345.0);
        assert_eq!(time_to_angle(&at(9, 30), o), 142.5);
    }

    #[test]
    fn angle_to_time_reattaches_anchor_date() {
        let t = angle_to_time(142.5, day(), offset(90.0));
        assert_eq!(t, at(9, 30));
    }

    #[test]
    fn angle_to_time_wraps_out_of_range_degrees() {
        let o = offset(90.0);
        assert_eq!(angle_to_time(-15.0, day(), o), at(23, 0));
        assert_eq!(angle_to_time(375.0, day(), o), at(1, 0));
        assert_eq!(angle_to_time(720.0, day(), o), at(0, 0));
    }

    #[test]
    fn angle_to_time_inverts_offset() {
        let o = RotationOffset::ZERO;
        assert_eq!(angle_to_time(270.0, day(), o), at(0, 0));
        assert_eq!(angle_to_time(0.0, day(), o), at(6, 0));
    }

    #[test]
    fn angle_just_below_full_turn_wraps_to_midnight_same_day() {
        let t = angle_to_time(359.999_9, day(), offset(90.0));
        assert_eq!(t, at(0, 0));
    }

    #[test]
    fn snapping_rounds_to_nearest_step() {
        let o = offset(90.0);
        // 9:32 -> 9:30 with five minute steps
        let degrees = time_to_angle(&at(9, 32), o);
        assert_eq!(angle_to_time_snapped(degrees, day(), o, 5), at(9, 30));
        // 9:33 -> 9:35
        let degrees = time_to_angle(&at(9, 33), o);
        assert_eq!(angle_to_time_snapped(degrees, day(), o, 5), at(9, 35));
        // step of 1 is a no-op
        assert_eq!(angle_to_time_snapped(degrees, day(), o, 1), at(9, 33));
    }

    #[test]
    fn snapping_past_end_of_day_wraps_to_midnight() {
        let o = offset(90.0);
        let degrees = time_to_angle(&at(23, 58), o);
        assert_eq!(angle_to_time_snapped(degrees, day(), o, 15), at(0, 0));
    }

    #[test]
    fn rotation_shift_preserves_date_across_midnight() {
        // 90 degrees is six hours
        let shifted = apply_rotation_offset(&at(22, 0), offset(90.0), false);
        assert_eq!(shifted, at(4, 0));

        let back = apply_rotation_offset(&at(2, 0), offset(90.0), true);
        assert_eq!(back, at(20, 0));
    }

    #[test]
    fn rotation_shift_inverse_round_trips() {
        let o = offset(37.5);
        let t = at(13, 17);
        let there = apply_rotation_offset(&t, o, false);
        assert_eq!(apply_rotation_offset(&there, o, true), t);
    }

    #[test]
    fn fractional_minutes_include_seconds() {
        let t = NaiveTime::from_hms_opt(0, 1, 30).unwrap();
        assert_eq!(minutes_since_midnight(t), 1.5);
    }

    #[test]
    fn normalize_helpers_are_non_negative() {
        assert_eq!(normalize_minutes(-1.0), 1439.0);
        assert_eq!(normalize_minutes(1440.0), 0.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
        assert_eq!(normalize_degrees(-450.0), 270.0);
    }

    #[test]
    fn offset_serializes_as_plain_number() {
        let json = serde_json::to_string(&offset(45.0)).unwrap();
        assert_eq!(json, "45.0");
        let parsed: RotationOffset = serde_json::from_str("405").unwrap();
        assert_eq!(parsed.degrees(), 45.0);
    }
}
