use clap::Subcommand;
use dayring_core::{assign_lanes, group_overlaps, TaskInterval};
use serde::Serialize;
use std::path::PathBuf;

use super::CommandResult;

#[derive(Subcommand)]
pub enum OverlapAction {
    /// Group overlapping tasks from a JSON file (array of tasks)
    Groups {
        /// Path to the tasks JSON file
        file: PathBuf,
        /// Include stacking lanes for each group
        #[arg(long)]
        lanes: bool,
    },
}

#[derive(Serialize)]
struct GroupOutput<'a> {
    ids: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lanes: Option<Vec<dayring_core::LaneAssignment>>,
}

pub fn run(action: OverlapAction) -> CommandResult {
    match action {
        OverlapAction::Groups { file, lanes } => {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
            let tasks: Vec<TaskInterval> = serde_json::from_str(&content)?;
            tracing::debug!(tasks = tasks.len(), "loaded tasks");

            let groups = group_overlaps(&tasks);
            let output: Vec<GroupOutput<'_>> = groups
                .iter()
                .map(|group| GroupOutput {
                    ids: group.ids(),
                    lanes: lanes.then(|| assign_lanes(group)),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
