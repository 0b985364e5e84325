//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::pal::abstractions::Platform;

/// Arbitrary starting point far enough from the epoch that rewinding never underflows.
const FAKE_START_SECS: u64 = 1_000_000;

/// Fake implementation of the platform abstraction for testing.
///
/// Tests control the wall-clock value instead of relying on the system clock. Multiple
/// clones of the same `FakePlatform` share the same underlying time, allowing tests to
/// move the clock after the platform has been handed to a timer.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<SystemTime>>,
}

impl FakePlatform {
    /// Creates a new fake platform whose clock stands still until moved.
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(UNIX_EPOCH + Duration::from_secs(FAKE_START_SECS))),
        }
    }

    /// Moves the wall clock forward, simulating time passing.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *now = now
            .checked_add(by)
            .expect("fake clock advanced beyond representable time");
    }

    /// Moves the wall clock backward, simulating an operating system clock adjustment.
    pub(crate) fn rewind(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *now = now
            .checked_sub(by)
            .expect("fake clock rewound beyond representable time");
    }
}

impl Platform for FakePlatform {
    fn wall_clock_now(&self) -> SystemTime {
        *self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn clock_stands_still_until_moved() {
        let platform = FakePlatform::new();

        assert_eq!(platform.wall_clock_now(), platform.wall_clock_now());
    }

    #[test]
    fn advance_moves_clock_forward() {
        let platform = FakePlatform::new();
        let start = platform.wall_clock_now();

        platform.advance(Duration::from_millis(150));

        assert_eq!(
            platform.wall_clock_now().duration_since(start).unwrap(),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn rewind_moves_clock_backward() {
        let platform = FakePlatform::new();
        let start = platform.wall_clock_now();

        platform.rewind(Duration::from_millis(5));

        assert_eq!(
            start.duration_since(platform.wall_clock_now()).unwrap(),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.advance(Duration::from_millis(100));
        assert_eq!(platform1.wall_clock_now(), platform2.wall_clock_now());
    }
}
