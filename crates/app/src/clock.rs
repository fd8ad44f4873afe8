//! In-process [`Clock`] implementations.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Timelike;
use scenehub_domain::time::TimeOfDay;

use crate::ports::Clock;

/// Local wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        chrono::Local::now().time()
    }
}

/// A clock that reports a settable time of day, with second precision.
///
/// Used by simulations and tests to pin time-window evaluation.
#[derive(Debug)]
pub struct FixedClock {
    seconds_from_midnight: AtomicU32,
}

impl FixedClock {
    #[must_use]
    pub fn new(time: TimeOfDay) -> Self {
        Self {
            seconds_from_midnight: AtomicU32::new(time.num_seconds_from_midnight()),
        }
    }

    /// Move the clock to `time`.
    pub fn set(&self, time: TimeOfDay) {
        self.seconds_from_midnight
            .store(time.num_seconds_from_midnight(), Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> TimeOfDay {
        let seconds = self.seconds_from_midnight.load(Ordering::Relaxed);
        TimeOfDay::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or(TimeOfDay::MIN)
    }
}
