//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::SystemTime;

/// Provides access to the wall clock.
///
/// Kernel timings are wall-clock measurements on purpose: they include scheduling and
/// device-wait time as observed by the caller, so the clock is the system real-time clock
/// and not a processor time counter.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current wall-clock time.
    ///
    /// Consecutive calls are not guaranteed to be monotonic because the operating system
    /// may adjust the wall clock at any time.
    fn wall_clock_now(&self) -> SystemTime;
}
