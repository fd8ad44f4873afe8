//! Time and timestamp helpers.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for event arrival times.
pub type Timestamp = DateTime<Utc>;

/// Local wall-clock time of day, without a date component.
pub type TimeOfDay = NaiveTime;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a time of day written as `HH:MM` or `HH:MM:SS` (24-hour clock).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeOfDay`] for anything else.
pub fn parse_time_of_day(raw: &str) -> Result<TimeOfDay, ValidationError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTimeOfDay(raw.to_string()))
}

/// Render a time of day as `HH:MM`, keeping seconds only when present.
#[must_use]
pub fn format_time_of_day(time: TimeOfDay) -> String {
    use chrono::Timelike;

    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Serde adapter for `Option<TimeOfDay>` fields written as `"HH:MM"`.
pub mod optional_time_of_day {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{TimeOfDay, format_time_of_day, parse_time_of_day};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<TimeOfDay>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_some(&format_time_of_day(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeOfDay>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|value| parse_time_of_day(&value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
