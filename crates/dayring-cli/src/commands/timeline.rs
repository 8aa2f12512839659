use chrono::Local;
use clap::Subcommand;
use dayring_core::{AnchorSnapshot, Config, SnapshotParts};
use std::path::PathBuf;

use super::{parse_time, CommandResult};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Place the live indicator using a measured anchor snapshot
    Now {
        /// Path to the anchors JSON file ({"total_height": .., "anchors": [..]})
        file: PathBuf,
        /// Time to place (HH:MM or HH:MM:SS, defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Override the snapshot's total height
        #[arg(long, allow_hyphen_values = true)]
        height: Option<f64>,
    },
    /// Place a time with no anchors (proportional to the configured height)
    Proportional {
        /// Time as HH:MM or HH:MM:SS
        time: String,
    },
}

pub fn run(action: TimelineAction) -> CommandResult {
    match action {
        TimelineAction::Now { file, at, height } => {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
            let mut parts: SnapshotParts = serde_json::from_str(&content)?;
            if let Some(height) = height {
                parts.total_height = height;
            }
            let snapshot = AnchorSnapshot::try_from(parts)?;

            let now = match at {
                Some(time) => parse_time(&time)?,
                None => Local::now().time(),
            };
            let placement = snapshot.locate(now);
            println!("{}", serde_json::to_string_pretty(&placement)?);
        }
        TimelineAction::Proportional { time } => {
            let config = Config::load_or_default();
            let snapshot = AnchorSnapshot::empty(config.timeline.total_height)?;
            println!("{}", snapshot.position_at(parse_time(&time)?));
        }
    }
    Ok(())
}
