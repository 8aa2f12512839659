//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Ring rotation offset (which hour sits at the reference position)
//! - Drag snapping granularity
//! - Fallback timeline height used when no anchors are measured
//!
//! Configuration is stored at `~/.config/dayring/config.toml`.
//! Changes are returned as [`ConfigEvent`]s; nothing is broadcast globally.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::clock::RotationOffset;
use crate::error::{ConfigError, CoreError, ValidationError};
use crate::events::ConfigEvent;

const MAX_SNAP_MINUTES: u32 = 720;

/// Ring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Degrees locating hour 0, kept within [0, 360).
    #[serde(default)]
    pub rotation_offset: f64,
    #[serde(default = "default_snap_minutes")]
    pub snap_minutes: u32,
}

/// Vertical timeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_total_height")]
    pub total_height: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayring/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

fn default_snap_minutes() -> u32 {
    5
}
fn default_total_height() -> f64 {
    1440.0
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            rotation_offset: 0.0,
            snap_minutes: default_snap_minutes(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            total_height: default_total_height(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ring: RingConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    other => return Err(invalid(format!("unsupported setting type: {other}"))),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read or
    /// parsed, or [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let mut cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        cfg.normalize()?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Change a value in memory and report what changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. The config is left untouched on error.
    pub fn update(&mut self, key: &str, value: &str) -> Result<Vec<ConfigEvent>, CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let mut updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.normalize()?;

        let events = ConfigEvent::diff(self, &updated, Utc::now());
        debug!(key, changes = events.len(), "config updated");
        *self = updated;
        Ok(events)
    }

    /// Change a value and persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<Vec<ConfigEvent>, CoreError> {
        let events = self.update(key, value)?;
        self.save()?;
        Ok(events)
    }

    /// The configured rotation offset as a validated value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] for a NaN or infinite offset.
    pub fn rotation_offset(&self) -> Result<RotationOffset, ValidationError> {
        RotationOffset::new(self.ring.rotation_offset)
    }

    /// Validate ranges and wrap the rotation offset into [0, 360).
    fn normalize(&mut self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let offset = self
            .rotation_offset()
            .map_err(|e| invalid("ring.rotation_offset", e.to_string()))?;
        self.ring.rotation_offset = offset.degrees();

        if self.ring.snap_minutes > MAX_SNAP_MINUTES {
            return Err(invalid(
                "ring.snap_minutes",
                format!("must be at most {MAX_SNAP_MINUTES}"),
            ));
        }

        let height = self.timeline.total_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(invalid(
                "timeline.total_height",
                format!("must be a positive number, got {height}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.ring.snap_minutes, 5);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[ring]\nrotation_offset = 90.0\n").unwrap();
        assert_eq!(parsed.ring.rotation_offset, 90.0);
        assert_eq!(parsed.ring.snap_minutes, 5);
        assert_eq!(parsed.timeline.total_height, 1440.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ring.snap_minutes").as_deref(), Some("5"));
        assert_eq!(cfg.get("timeline.total_height").as_deref(), Some("1440.0"));
        assert!(cfg.get("ring.missing_key").is_none());
        assert!(cfg.get("ring").is_none());
    }

    #[test]
    fn update_wraps_offset_and_reports_change() {
        let mut cfg = Config::default();
        let events = cfg.update("ring.rotation_offset", "450").unwrap();
        assert_eq!(cfg.ring.rotation_offset, 90.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ConfigEvent::RotationOffsetChanged { from, to, .. } if from == 0.0 && to == 90.0
        ));
    }

    #[test]
    fn update_with_same_value_reports_nothing() {
        let mut cfg = Config::default();
        let events = cfg.update("ring.snap_minutes", "5").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn update_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.update("ring.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.update("ring", "1").is_err());
        assert!(cfg.update("", "1").is_err());
    }

    #[test]
    fn update_rejects_non_finite_and_out_of_range() {
        let mut cfg = Config::default();
        assert!(cfg.update("ring.rotation_offset", "NaN").is_err());
        assert!(cfg.update("ring.rotation_offset", "inf").is_err());
        assert!(cfg.update("ring.rotation_offset", "abc").is_err());
        assert!(cfg.update("timeline.total_height", "-10").is_err());
        assert!(cfg.update("timeline.total_height", "0").is_err());
        assert!(cfg.update("ring.snap_minutes", "1000").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn update_rejects_non_numeric_values() {
        let mut cfg = Config::default();
        for value in ["true", "five", ""] {
            let err = cfg.update("ring.snap_minutes", value).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "ring.snap_minutes"
            ));
        }
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.update("ring.rotation_offset", "90").unwrap();
        cfg.update("timeline.total_height", "480").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.rotation_offset().unwrap().degrees(), 90.0);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timeline]\ntotal_height = -1.0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not toml at all [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn load_wraps_offset_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ring]\nrotation_offset = -90.0\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ring.rotation_offset, 270.0);
    }
}
