use std::time::SystemTime;

use crate::pal::Platform;

/// Singleton instance of `RealPlatform`, used by public API types
/// to hook up to the operating system clock.
pub(crate) static REAL_PLATFORM: RealPlatform = RealPlatform;

#[derive(Debug)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Real clock values cannot be asserted exactly.
    fn wall_clock_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
#[cfg(not(miri))] // Miri cannot talk to the real platform.
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn now_is_approximately_now() {
        let before = SystemTime::now();
        let observed = REAL_PLATFORM.wall_clock_now();
        let after = SystemTime::now();

        // The wall clock may be adjusted between the calls, so allow generous slack.
        let slack = Duration::from_secs(1);
        assert!(observed + slack >= before);
        assert!(observed <= after + slack);
    }
}
