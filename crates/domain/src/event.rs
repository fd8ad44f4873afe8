//! Event — an inbound trigger reported by a device or by the home itself.
//!
//! A device event names the device it comes from (by id or display name);
//! a global event has no device and is only matched by global rules.

use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{Timestamp, now};

/// Something that happened and may fire rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    /// Device reference, `None` for a global event.
    pub device: Option<String>,
    pub received_at: Timestamp,
}

impl Event {
    /// A device-scoped event.
    #[must_use]
    pub fn device(event_type: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            device: Some(device.into()),
            received_at: now(),
        }
    }

    /// A global event, not tied to any device.
    #[must_use]
    pub fn global(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            device: None,
            received_at: now(),
        }
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.device.is_none()
    }

    /// Time spent between arrival and `at`, never negative.
    #[must_use]
    pub fn age(&self, at: Timestamp) -> TimeDelta {
        (at - self.received_at).max(TimeDelta::zero())
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.device {
            Some(device) => write!(f, "{}@{device}", self.event_type),
            None => write!(f, "{}@global", self.event_type),
        }
    }
}

/// Parses `"<event_type> [device]"`; everything after the first
/// whitespace is the device reference, so names may contain spaces.
impl FromStr for Event {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(ValidationError::EmptyTriggerEvent);
        }
        match line.split_once(char::is_whitespace) {
            Some((event_type, device)) if !device.trim().is_empty() => {
                Ok(Self::device(event_type, device.trim()))
            }
            _ => Ok(Self::global(line)),
        }
    }
}
