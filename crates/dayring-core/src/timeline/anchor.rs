//! Anchor points measured by the renderer.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::{minutes_since_midnight, MINUTES_PER_DAY};
use crate::error::ValidationError;

const HOURS_PER_DAY: u32 = 24;

/// Time range drawn as a category block, with its measured height.
///
/// An `end` earlier than `start` means the block crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub height: f64,
}

impl BlockSpan {
    pub fn start_minute(&self) -> f64 {
        minutes_since_midnight(self.start)
    }

    /// End minute, past 1440 for blocks crossing midnight.
    pub fn end_minute(&self) -> f64 {
        let end = minutes_since_midnight(self.end);
        if self.end < self.start {
            end + MINUTES_PER_DAY
        } else {
            end
        }
    }

    /// Trailing edge as a plain time-of-day minute.
    pub(crate) fn end_edge_minute(&self) -> f64 {
        minutes_since_midnight(self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Bring an early-morning `minute` onto the same axis as a block that
    /// started the previous evening.
    fn unwrap(&self, minute: f64) -> f64 {
        if self.end < self.start && minute < self.start_minute() {
            minute + MINUTES_PER_DAY
        } else {
            minute
        }
    }

    /// Whether `minute` lies in `[start, end)`.
    pub fn contains(&self, minute: f64) -> bool {
        let minute = self.unwrap(minute);
        self.start_minute() <= minute && minute < self.end_minute()
    }

    /// Progress through the block at `minute`, clamped to [0, 1].
    pub fn fraction(&self, minute: f64) -> f64 {
        let length = self.end_minute() - self.start_minute();
        if length <= 0.0 {
            return 0.0;
        }
        ((self.unwrap(minute) - self.start_minute()) / length).clamp(0.0, 1.0)
    }
}

/// A screen coordinate tied to an hour label or a category block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    /// Hour label (0..=24); for blocks, the hour the block starts in.
    pub hour: u32,
    /// Measured coordinate of the label, or of the block's top edge.
    pub position: f64,
    #[serde(default)]
    pub block: Option<BlockSpan>,
}

impl AnchorPoint {
    pub fn hour_label(hour: u32, position: f64) -> Self {
        Self {
            hour,
            position,
            block: None,
        }
    }

    pub fn category_block(start: NaiveTime, end: NaiveTime, position: f64, height: f64) -> Self {
        Self {
            hour: start.hour(),
            position,
            block: Some(BlockSpan { start, end, height }),
        }
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }

    /// Coordinate of the block's bottom edge; the label position otherwise.
    pub fn bottom(&self) -> f64 {
        match self.block {
            Some(span) => self.position + span.height,
            None => self.position,
        }
    }

    fn block_start(&self) -> f64 {
        self.block.map(|s| s.start_minute()).unwrap_or(f64::from(self.hour) * 60.0)
    }
}

/// Serialized form of a snapshot, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotParts {
    pub total_height: f64,
    #[serde(default)]
    pub anchors: Vec<AnchorPoint>,
}

/// Anchors from one layout pass.
///
/// Immutable once built; a new layout pass produces a new snapshot. Never
/// mix anchors from two passes: monotonic placement only holds within one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotParts", into = "SnapshotParts")]
pub struct AnchorSnapshot {
    /// Hour labels sorted by hour
    labels: Vec<AnchorPoint>,
    /// Category blocks sorted by start
    blocks: Vec<AnchorPoint>,
    total_height: f64,
}

impl AnchorSnapshot {
    /// Validate renderer output into a snapshot.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `total_height` is not a positive
    /// finite number, an hour exceeds 24, or a position or block height is
    /// non-finite (heights must also be non-negative).
    pub fn new(anchors: Vec<AnchorPoint>, total_height: f64) -> Result<Self, ValidationError> {
        let total_height = ValidationError::check_finite("total_height", total_height)?;
        if total_height <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "total_height".to_string(),
                message: format!("must be positive, got {total_height}"),
            });
        }

        let mut labels = Vec::new();
        let mut blocks = Vec::new();
        for anchor in anchors {
            ValidationError::check_range("hour", f64::from(anchor.hour), 0.0, f64::from(HOURS_PER_DAY))?;
            ValidationError::check_finite("position", anchor.position)?;
            match anchor.block {
                Some(span) => {
                    ValidationError::check_range("height", span.height, 0.0, f64::MAX)?;
                    blocks.push(anchor);
                }
                None => labels.push(anchor),
            }
        }

        labels.sort_by_key(|a| a.hour);
        blocks.sort_by(|a, b| {
            let (sa, sb) = (a.block_start(), b.block_start());
            sa.total_cmp(&sb).then(a.position.total_cmp(&b.position))
        });

        Ok(Self {
            labels,
            blocks,
            total_height,
        })
    }

    /// Snapshot with no anchors; placement falls back to proportional mapping.
    pub fn empty(total_height: f64) -> Result<Self, ValidationError> {
        Self::new(Vec::new(), total_height)
    }

    pub fn labels(&self) -> &[AnchorPoint] {
        &self.labels
    }

    pub fn blocks(&self) -> &[AnchorPoint] {
        &self.blocks
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.blocks.is_empty()
    }

    pub fn label_at(&self, hour: u32) -> Option<&AnchorPoint> {
        self.labels.iter().find(|a| a.hour == hour)
    }

    /// Mean of `(y_next - y_prev) / (hour_next - hour_prev)` over
    /// consecutive hour labels, or `total_height / 24` with fewer than two.
    pub fn mean_spacing_per_hour(&self) -> f64 {
        let slopes: Vec<f64> = self
            .labels
            .windows(2)
            .filter(|pair| pair[1].hour > pair[0].hour)
            .map(|pair| (pair[1].position - pair[0].position) / f64::from(pair[1].hour - pair[0].hour))
            .collect();

        if slopes.is_empty() {
            self.total_height / f64::from(HOURS_PER_DAY)
        } else {
            slopes.iter().sum::<f64>() / slopes.len() as f64
        }
    }
}

impl TryFrom<SnapshotParts> for AnchorSnapshot {
    type Error = ValidationError;

    fn try_from(parts: SnapshotParts) -> Result<Self, Self::Error> {
        Self::new(parts.anchors, parts.total_height)
    }
}

impl From<AnchorSnapshot> for SnapshotParts {
    fn from(snapshot: AnchorSnapshot) -> Self {
        let mut anchors = snapshot.labels;
        anchors.extend(snapshot.blocks);
        Self {
            total_height: snapshot.total_height,
            anchors,
        }
    }
}
