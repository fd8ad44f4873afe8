//! Time window — an optional time-of-day range guarding a rule.

use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, format_time_of_day, optional_time_of_day};

/// Local time-of-day range. Both ends are optional and inclusive.
///
/// When `start_after` is later than `end_before` the window wraps past
/// midnight (e.g. `23:00..02:00`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(
        default,
        with = "optional_time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_after: Option<TimeOfDay>,
    #[serde(
        default,
        with = "optional_time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_before: Option<TimeOfDay>,
}

impl TimeWindow {
    /// A window that is always open.
    #[must_use]
    pub const fn always() -> Self {
        Self {
            start_after: None,
            end_before: None,
        }
    }

    /// A window bounded on both sides.
    #[must_use]
    pub const fn between(start_after: TimeOfDay, end_before: TimeOfDay) -> Self {
        Self {
            start_after: Some(start_after),
            end_before: Some(end_before),
        }
    }

    /// Whether both bounds are set and the window crosses midnight.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        matches!((self.start_after, self.end_before), (Some(start), Some(end)) if start > end)
    }

    /// Whether `now` falls inside the window.
    #[must_use]
    pub fn contains(&self, now: TimeOfDay) -> bool {
        match (self.start_after, self.end_before) {
            (None, None) => true,
            (Some(start), None) => now >= start,
            (None, Some(end)) => now <= end,
            (Some(start), Some(end)) if start <= end => start <= now && now <= end,
            (Some(start), Some(end)) => now >= start || now <= end,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start_after.is_none() && self.end_before.is_none() {
            return f.write_str("any time");
        }
        let start = self.start_after.map(format_time_of_day);
        let end = self.end_before.map(format_time_of_day);
        write!(
            f,
            "{}..{}",
            start.as_deref().unwrap_or(""),
            end.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn should_always_be_open_without_bounds() {
        let window = TimeWindow::always();
        assert!(window.contains(at(0, 0)));
        assert!(window.contains(at(12, 0)));
        assert!(window.contains(at(23, 59)));
    }

    #[test]
    fn should_leave_missing_end_unconstrained() {
        let window = TimeWindow {
            start_after: Some(at(18, 0)),
            end_before: None,
        };
        assert!(!window.contains(at(17, 59)));
        assert!(window.contains(at(18, 0)));
        assert!(window.contains(at(23, 59)));
    }

    #[test]
    fn should_leave_missing_start_unconstrained() {
        let window = TimeWindow {
            start_after: None,
            end_before: Some(at(7, 0)),
        };
        assert!(window.contains(at(0, 0)));
        assert!(window.contains(at(7, 0)));
        assert!(!window.contains(at(7, 1)));
    }

    #[test]
    fn should_match_same_day_window() {
        let window = TimeWindow::between(at(9, 0), at(17, 0));
        assert!(!window.is_overnight());
        assert!(window.contains(at(12, 0)));
        assert!(!window.contains(at(8, 0)));
        assert!(!window.contains(at(18, 0)));
    }

    #[test]
    fn should_include_same_day_boundaries() {
        let window = TimeWindow::between(at(9, 0), at(17, 0));
        assert!(window.contains(at(9, 0)));
        assert!(window.contains(at(17, 0)));
    }

    #[test]
    fn should_wrap_overnight_window_past_midnight() {
        let window = TimeWindow::between(at(23, 0), at(2, 0));
        assert!(window.is_overnight());
        assert!(window.contains(at(23, 30)));
        assert!(window.contains(at(1, 30)));
        assert!(!window.contains(at(12, 0)));
    }

    #[test]
    fn should_include_overnight_boundaries() {
        let window = TimeWindow::between(at(23, 0), at(2, 0));
        assert!(window.contains(at(23, 0)));
        assert!(window.contains(at(2, 0)));
        assert!(!window.contains(at(2, 1)));
        assert!(!window.contains(at(22, 59)));
    }

    #[test]
    fn should_treat_equal_bounds_as_single_instant() {
        let window = TimeWindow::between(at(6, 30), at(6, 30));
        assert!(window.contains(at(6, 30)));
        assert!(!window.contains(at(6, 31)));
    }

    #[test]
    fn should_display_bounds() {
        assert_eq!(TimeWindow::always().to_string(), "any time");
        assert_eq!(
            TimeWindow::between(at(23, 0), at(2, 0)).to_string(),
            "23:00..02:00"
        );
        let open_end = TimeWindow {
            start_after: Some(at(18, 0)),
            end_before: None,
        };
        assert_eq!(open_end.to_string(), "18:00..");
    }

    #[test]
    fn should_deserialize_hh_mm_bounds() {
        let window: TimeWindow =
            serde_json::from_str(r#"{"start_after": "23:00", "end_before": "02:00"}"#).unwrap();
        assert_eq!(window, TimeWindow::between(at(23, 0), at(2, 0)));

        let window: TimeWindow = serde_json::from_str("{}").unwrap();
        assert_eq!(window, TimeWindow::always());
    }

    #[test]
    fn should_reject_malformed_bound() {
        let result: Result<TimeWindow, _> = serde_json::from_str(r#"{"start_after": "late"}"#);
        assert!(result.is_err());
    }
}
