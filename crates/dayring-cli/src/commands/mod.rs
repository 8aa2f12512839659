pub mod config;
pub mod overlap;
pub mod ring;
pub mod timeline;

use chrono::NaiveTime;
use dayring_core::{Config, RotationOffset};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Offset from the command line, or the configured one.
pub fn resolve_offset(flag: Option<f64>) -> Result<RotationOffset, Box<dyn std::error::Error>> {
    match flag {
        Some(degrees) => Ok(RotationOffset::new(degrees)?),
        None => Ok(Config::load_or_default().rotation_offset()?),
    }
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(input: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| format!("invalid time '{input}', expected HH:MM or HH:MM:SS").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_minutes_and_seconds() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(
            parse_time("23:59:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn explicit_offset_is_validated() {
        assert_eq!(resolve_offset(Some(450.0)).unwrap().degrees(), 90.0);
        assert!(resolve_offset(Some(f64::NAN)).is_err());
    }
}
