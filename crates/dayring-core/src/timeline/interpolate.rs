//! Tiered placement of the current time on the timeline.
//!
//! The first matching rule wins:
//! 1. inside a category block: proportional within the block's height;
//! 2. beside a block edge in the same hour: linear towards the next (or from
//!    the previous) anchor in that hour, else the mean spacing;
//! 3. hour labels: linear to the next anchor from an exact-hour label, else
//!    extrapolated with the mean spacing, else proportional to the height.
//!
//! Every branch has a fallback, so placement never fails. Anchors here means
//! hour labels and both edges of every block. Extrapolated values are kept
//! between the anchors on either side, so a snapshot whose positions grow
//! with time yields a placement that never moves backwards.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

use super::anchor::AnchorSnapshot;
use crate::clock::{minutes_since_midnight, MINUTES_PER_DAY};

/// Which rule produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementTier {
    /// Inside a category block
    Block,
    /// Between a block edge and a neighbouring anchor in the same hour
    BlockGap,
    /// Between an exact-hour label and the next anchor
    HourLabel,
    /// Extrapolated with the mean spacing per hour
    Extrapolated,
    /// No anchors at all
    Proportional,
}

/// A screen coordinate for "now" and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: f64,
    pub tier: PlacementTier,
}

impl Placement {
    fn new(position: f64, tier: PlacementTier) -> Self {
        Self { position, tier }
    }
}

/// A known (minute, coordinate) pair.
#[derive(Debug, Clone, Copy)]
struct Mark {
    minute: f64,
    position: f64,
}

impl Mark {
    fn lerp_to(self, to: Mark, minute: f64) -> f64 {
        let span = to.minute - self.minute;
        if span <= 0.0 {
            return self.position;
        }
        self.position + (to.position - self.position) * (minute - self.minute) / span
    }

    fn extrapolate(self, per_hour: f64, minute: f64) -> f64 {
        self.position + per_hour * (minute - self.minute) / 60.0
    }

    fn chronological(a: &Mark, b: &Mark) -> Ordering {
        a.minute
            .total_cmp(&b.minute)
            .then(a.position.total_cmp(&b.position))
    }
}

fn hour_of(minute: f64) -> u32 {
    ((minute / 60.0).floor().max(0.0) as u32).min(23)
}

/// Last mark at or before `minute` and first mark after it.
fn surrounding(marks: &[Mark], minute: f64) -> (Option<Mark>, Option<Mark>) {
    let prev = marks.iter().rev().find(|m| m.minute <= minute).copied();
    let next = marks.iter().find(|m| m.minute > minute).copied();
    (prev, next)
}

fn capped(position: f64, next: Option<Mark>) -> f64 {
    match next {
        Some(n) => position.min(n.position),
        None => position,
    }
}

impl AnchorSnapshot {
    /// Place `now` on the timeline.
    pub fn locate(&self, now: NaiveTime) -> Placement {
        let minute = minutes_since_midnight(now);
        let marks = self.marks();
        let placement = self
            .within_block(minute)
            .or_else(|| self.beside_block(minute, &marks))
            .unwrap_or_else(|| self.along_labels(minute, &marks));
        trace!(
            minute,
            position = placement.position,
            tier = ?placement.tier,
            "placed now indicator"
        );
        placement
    }

    pub fn locate_instant(&self, now: &NaiveDateTime) -> Placement {
        self.locate(now.time())
    }

    /// Screen coordinate for `now`.
    pub fn position_at(&self, now: NaiveTime) -> f64 {
        self.locate(now).position
    }

    fn within_block(&self, minute: f64) -> Option<Placement> {
        self.blocks()
            .iter()
            .find_map(|anchor| {
                let span = anchor.block?;
                if span.is_degenerate() {
                    (minute == span.start_minute()).then_some(anchor.position)
                } else if span.contains(minute) {
                    Some(anchor.position + span.height * span.fraction(minute))
                } else {
                    None
                }
            })
            .map(|position| Placement::new(position, PlacementTier::Block))
    }

    /// Hours fully covered by blocks have no label, so the gaps around a
    /// block are bridged inside the block's own hour.
    fn beside_block(&self, minute: f64, marks: &[Mark]) -> Option<Placement> {
        let hour = hour_of(minute);
        let hour_start = f64::from(hour) * 60.0;
        let per_hour = self.mean_spacing_per_hour();
        let (prev, next) = surrounding(marks, minute);

        let trailing = self
            .blocks()
            .iter()
            .filter_map(|anchor| {
                let edge = anchor.block?.end_edge_minute();
                (edge <= minute && hour_of(edge) == hour).then_some(Mark {
                    minute: edge,
                    position: anchor.bottom(),
                })
            })
            .max_by(Mark::chronological);

        if let Some(from) = trailing {
            let position = match self.next_mark_in_hour(minute, hour_start + 60.0) {
                Some(to) => from.lerp_to(to, minute),
                None => capped(from.extrapolate(per_hour, minute), next),
            };
            return Some(Placement::new(position, PlacementTier::BlockGap));
        }

        let leading = self
            .blocks()
            .iter()
            .filter_map(|anchor| {
                let start = anchor.block?.start_minute();
                (start > minute && hour_of(start) == hour).then_some(Mark {
                    minute: start,
                    position: anchor.position,
                })
            })
            .min_by(Mark::chronological)?;

        let position = match (self.label_at(hour), prev) {
            (Some(label), _) => Mark {
                minute: hour_start,
                position: label.position,
            }
            .lerp_to(leading, minute),
            // Stay at or above whatever the earlier hours already reached on
            // their way to this block.
            (None, Some(p)) => leading
                .extrapolate(per_hour, minute)
                .max(p.lerp_to(leading, minute))
                .max(p.extrapolate(per_hour, minute).min(leading.position)),
            (None, None) => leading.extrapolate(per_hour, minute),
        };
        Some(Placement::new(position, PlacementTier::BlockGap))
    }

    /// Earliest block start or closing hour label after `minute`, up to the
    /// end of the current hour.
    fn next_mark_in_hour(&self, minute: f64, hour_end: f64) -> Option<Mark> {
        let block_starts = self.blocks().iter().filter_map(|anchor| {
            let start = anchor.block?.start_minute();
            (start > minute && start <= hour_end).then_some(Mark {
                minute: start,
                position: anchor.position,
            })
        });
        let closing_label = self
            .labels()
            .iter()
            .filter(|label| f64::from(label.hour) * 60.0 == hour_end)
            .map(|label| Mark {
                minute: hour_end,
                position: label.position,
            });
        block_starts.chain(closing_label).min_by(Mark::chronological)
    }

    fn along_labels(&self, minute: f64, marks: &[Mark]) -> Placement {
        let per_hour = self.mean_spacing_per_hour();
        let hour = hour_of(minute);
        let (prev, next) = surrounding(marks, minute);

        if let Some(label) = self.label_at(hour) {
            let from = Mark {
                minute: f64::from(hour) * 60.0,
                position: label.position,
            };
            return match next {
                Some(to) => Placement::new(from.lerp_to(to, minute), PlacementTier::HourLabel),
                None => Placement::new(from.extrapolate(per_hour, minute), PlacementTier::Extrapolated),
            };
        }

        match (prev, next) {
            (Some(p), Some(n)) => {
                let extrapolated = p.extrapolate(per_hour, minute);
                // Never fall behind where the previous mark's own hour ended,
                // never pass the next mark.
                let floor = p.lerp_to(n, (p.minute + 60.0).min(n.minute));
                let position = if floor <= n.position {
                    extrapolated.clamp(floor, n.position)
                } else {
                    extrapolated
                };
                Placement::new(position, PlacementTier::Extrapolated)
            }
            (Some(p), None) => Placement::new(p.extrapolate(per_hour, minute), PlacementTier::Extrapolated),
            (None, Some(n)) => Placement::new(n.extrapolate(per_hour, minute), PlacementTier::Extrapolated),
            (None, None) => Placement::new(
                minute / MINUTES_PER_DAY * self.total_height(),
                PlacementTier::Proportional,
            ),
        }
    }

    /// Hour labels and block edges in time order.
    fn marks(&self) -> Vec<Mark> {
        let labels = self.labels().iter().map(|label| Mark {
            minute: f64::from(label.hour) * 60.0,
            position: label.position,
        });
        let edges = self.blocks().iter().filter_map(|anchor| {
            let span = anchor.block?;
            Some([
                Mark {
                    minute: span.start_minute(),
                    position: anchor.position,
                },
                Mark {
                    minute: span.end_minute(),
                    position: anchor.bottom(),
                },
            ])
        });

        let mut marks: Vec<Mark> = labels.chain(edges.flatten()).collect();
        marks.sort_by(Mark::chronological);
        marks
    }
}
