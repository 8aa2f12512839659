use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Subcommand;
use dayring_core::{
    angle_to_time_snapped, apply_rotation_offset, hour_marks, time_of_day_to_angle, DayAnchor,
};

use super::{parse_time, resolve_offset, CommandResult};

#[derive(Subcommand)]
pub enum RingAction {
    /// Ring angle of a time of day
    Angle {
        /// Time as HH:MM or HH:MM:SS
        time: String,
        /// Rotation offset in degrees (defaults to the configured offset)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },
    /// Time shown at a ring angle
    Time {
        /// Angle in degrees; out-of-range values wrap
        #[arg(allow_hyphen_values = true)]
        degrees: f64,
        /// Day to attach (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
        /// Snap to this many minutes
        #[arg(long, default_value_t = 0)]
        snap: u32,
    },
    /// Shift an instant's time of day by the offset (15 degrees = 1 hour)
    Shift {
        /// Instant as YYYY-MM-DDTHH:MM:SS
        instant: NaiveDateTime,
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
        /// Shift backwards
        #[arg(long)]
        inverse: bool,
    },
    /// Angles of the 24 hour ticks
    Marks {
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: RingAction) -> CommandResult {
    match action {
        RingAction::Angle { time, offset } => {
            let offset = resolve_offset(offset)?;
            let time = parse_time(&time)?;
            println!("{}", time_of_day_to_angle(time, offset));
        }
        RingAction::Time {
            degrees,
            date,
            offset,
            snap,
        } => {
            let offset = resolve_offset(offset)?;
            let day = DayAnchor::new(date.unwrap_or_else(|| Local::now().date_naive()));
            let instant = angle_to_time_snapped(degrees, day, offset, snap);
            println!("{}", instant.format("%Y-%m-%dT%H:%M:%S"));
        }
        RingAction::Shift {
            instant,
            offset,
            inverse,
        } => {
            let offset = resolve_offset(offset)?;
            let shifted = apply_rotation_offset(&instant, offset, inverse);
            println!("{}", shifted.format("%Y-%m-%dT%H:%M:%S"));
        }
        RingAction::Marks { offset, json } => {
            let marks = hour_marks(resolve_offset(offset)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&marks)?);
            } else {
                for (hour, degrees) in marks.iter().enumerate() {
                    println!("{hour:02}:00  {degrees}");
                }
            }
        }
    }
    Ok(())
}
