//! Live "now" placement on the vertical timeline.
//!
//! This module provides:
//! - Anchor points measured by the renderer after layout (hour labels and
//!   category blocks)
//! - An immutable, validated anchor snapshot
//! - Tiered interpolation of the current time into a screen position
//!
//! Layout and interpolation are two separate phases: the renderer lays out,
//! measures, and hands over a snapshot; interpolation only reads it.

mod anchor;
mod interpolate;

pub use anchor::{AnchorPoint, AnchorSnapshot, BlockSpan, SnapshotParts};
pub use interpolate::{Placement, PlacementTier};
