//! Clock port — the current local time of day.

use std::sync::Arc;

use scenehub_domain::time::TimeOfDay;

/// Source of "now" for time-window checks. Injectable for tests.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> TimeOfDay;
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> TimeOfDay {
        (**self).now()
    }
}
