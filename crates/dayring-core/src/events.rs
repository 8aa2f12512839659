use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::clock::RotationOffset;
use crate::error::ValidationError;
use crate::storage::Config;

/// Every configuration change produces a ConfigEvent.
/// Subscribers receive them explicitly; the core never polls a global store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConfigEvent {
    RotationOffsetChanged {
        from: f64,
        to: f64,
        at: DateTime<Utc>,
    },
    SnapMinutesChanged {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
    TimelineHeightChanged {
        from: f64,
        to: f64,
        at: DateTime<Utc>,
    },
}

impl ConfigEvent {
    /// Events describing how `new` differs from `old`.
    pub fn diff(old: &Config, new: &Config, at: DateTime<Utc>) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        if old.ring.rotation_offset != new.ring.rotation_offset {
            events.push(ConfigEvent::RotationOffsetChanged {
                from: old.ring.rotation_offset,
                to: new.ring.rotation_offset,
                at,
            });
        }
        if old.ring.snap_minutes != new.ring.snap_minutes {
            events.push(ConfigEvent::SnapMinutesChanged {
                from: old.ring.snap_minutes,
                to: new.ring.snap_minutes,
                at,
            });
        }
        if old.timeline.total_height != new.timeline.total_height {
            events.push(ConfigEvent::TimelineHeightChanged {
                from: old.timeline.total_height,
                to: new.timeline.total_height,
                at,
            });
        }
        events
    }
}

/// Narrow interface for anything that reacts to configuration changes.
pub trait ConfigObserver {
    fn config_changed(&mut self, event: &ConfigEvent);

    fn config_changed_all(&mut self, events: &[ConfigEvent]) {
        for event in events {
            self.config_changed(event);
        }
    }
}

/// Fans configuration events out to registered observers.
#[derive(Default)]
pub struct ConfigDispatcher {
    observers: Vec<Box<dyn ConfigObserver + Send>>,
}

impl ConfigDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn ConfigObserver + Send>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver `events` to every observer, in subscription order.
    pub fn dispatch(&mut self, events: &[ConfigEvent]) {
        if events.is_empty() {
            return;
        }
        debug!(
            events = events.len(),
            observers = self.observers.len(),
            "dispatching config events"
        );
        for observer in &mut self.observers {
            observer.config_changed_all(events);
        }
    }
}

impl fmt::Debug for ConfigDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDispatcher")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// The explicit configuration values passed into mapping calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSettings {
    pub offset: RotationOffset,
    pub snap_minutes: u32,
    pub total_height: f64,
}

impl RingSettings {
    /// # Errors
    /// Returns [`ValidationError::NonFinite`] if the configured offset is
    /// not a finite number.
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        Ok(Self {
            offset: config.rotation_offset()?,
            snap_minutes: config.ring.snap_minutes,
            total_height: config.timeline.total_height,
        })
    }
}

impl ConfigObserver for RingSettings {
    fn config_changed(&mut self, event: &ConfigEvent) {
        match *event {
            ConfigEvent::RotationOffsetChanged { to, .. } => match RotationOffset::new(to) {
                Ok(offset) => self.offset = offset,
                Err(e) => warn!(error = %e, "ignoring rotation offset change"),
            },
            ConfigEvent::SnapMinutesChanged { to, .. } => self.snap_minutes = to,
            ConfigEvent::TimelineHeightChanged { to, .. } => self.total_height = to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<ConfigEvent>>>);

    impl ConfigObserver for Recorder {
        fn config_changed(&mut self, event: &ConfigEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn diff_reports_each_changed_field() {
        let old = Config::default();
        let mut new = old.clone();
        new.ring.rotation_offset = 90.0;
        new.timeline.total_height = 480.0;

        let events = ConfigEvent::diff(&old, &new, Utc::now());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ConfigEvent::RotationOffsetChanged { .. }));
        assert!(matches!(events[1], ConfigEvent::TimelineHeightChanged { .. }));
    }

    #[test]
    fn dispatcher_delivers_to_all_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = ConfigDispatcher::new();
        dispatcher.subscribe(Box::new(Recorder(seen.clone())));
        dispatcher.subscribe(Box::new(Recorder(seen.clone())));
        assert_eq!(dispatcher.observer_count(), 2);

        let mut config = Config::default();
        let events = config.update("ring.snap_minutes", "15").unwrap();
        dispatcher.dispatch(&events);

        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn ring_settings_follow_events() {
        let mut config = Config::default();
        let mut settings = RingSettings::from_config(&config).unwrap();

        let events = config.update("ring.rotation_offset", "90").unwrap();
        settings.config_changed_all(&events);
        assert_eq!(settings.offset.degrees(), 90.0);

        let events = config.update("timeline.total_height", "480").unwrap();
        settings.config_changed_all(&events);
        assert_eq!(settings.total_height, 480.0);
        assert_eq!(settings, RingSettings::from_config(&config).unwrap());
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let event = ConfigEvent::SnapMinutesChanged {
            from: 5,
            to: 15,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SnapMinutesChanged");
        assert_eq!(json["to"], 15);
    }
}
