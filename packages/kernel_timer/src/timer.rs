//! Wall-clock interval measurement.

use std::time::SystemTime;

use crate::pal::{Platform, PlatformFacade};

/// Measures wall-clock time elapsed since the last reset.
///
/// The origin is captured when the timer is created and overwritten by every
/// [`reset()`](Self::reset). Reading the elapsed time does not change the origin, so it can be
/// read any number of times between resets.
///
/// # Clock adjustments
///
/// The timer reads the system wall clock. If the operating system moves the wall clock
/// backward between a reset and a read, [`elapsed_seconds()`](Self::elapsed_seconds) returns a
/// negative value. The value is reported as-is, without clamping or correction.
///
/// # Examples
///
/// ```
/// use kernel_timer::Timer;
///
/// let mut timer = Timer::new();
///
/// timer.reset();
/// std::thread::sleep(std::time::Duration::from_millis(1));
///
/// let elapsed = timer.elapsed_seconds();
/// println!("Slept for {elapsed:.6} seconds");
/// ```
#[derive(Debug)]
pub struct Timer {
    origin: SystemTime,
    platform: PlatformFacade,
}

impl Timer {
    /// Creates a timer whose origin is the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            origin: platform.wall_clock_now(),
            platform,
        }
    }

    /// Captures the current wall-clock time as the new origin.
    pub fn reset(&mut self) {
        self.origin = self.platform.wall_clock_now();
    }

    /// Returns the seconds elapsed since the last reset, with sub-microsecond resolution.
    ///
    /// Negative if the wall clock was moved backward since the last reset.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        let now = self.platform.wall_clock_now();

        match now.duration_since(self.origin) {
            Ok(forward) => forward.as_secs_f64(),
            Err(backward) => -backward.duration().as_secs_f64(),
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::pal::{FakePlatform, MockPlatform};

    const TOLERANCE: f64 = 1e-9;

    fn fake_timer() -> (Timer, FakePlatform) {
        let fake = FakePlatform::new();
        let timer = Timer::with_platform(PlatformFacade::fake(fake.clone()));
        (timer, fake)
    }

    #[test]
    fn elapsed_is_zero_without_clock_movement() {
        let (timer, _fake) = fake_timer();

        assert!(timer.elapsed_seconds().abs() < TOLERANCE);
    }

    #[test]
    fn elapsed_measures_from_creation_before_first_reset() {
        let (timer, fake) = fake_timer();

        fake.advance(Duration::from_millis(7));

        assert!((timer.elapsed_seconds() - 0.007).abs() < TOLERANCE);
    }

    #[test]
    fn reset_moves_origin_to_now() {
        let (mut timer, fake) = fake_timer();

        fake.advance(Duration::from_secs(10));
        timer.reset();
        fake.advance(Duration::from_millis(250));

        assert!((timer.elapsed_seconds() - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn reading_does_not_change_origin() {
        let (timer, fake) = fake_timer();

        fake.advance(Duration::from_millis(10));
        let first = timer.elapsed_seconds();
        fake.advance(Duration::from_millis(10));
        let second = timer.elapsed_seconds();

        assert!(second >= first);
        assert!((second - 0.020).abs() < TOLERANCE);
    }

    #[test]
    fn microsecond_resolution_is_preserved() {
        let (timer, fake) = fake_timer();

        fake.advance(Duration::from_micros(3));

        assert!((timer.elapsed_seconds() - 0.000_003).abs() < TOLERANCE);
    }

    #[test]
    fn backward_clock_adjustment_yields_negative_elapsed() {
        let (mut timer, fake) = fake_timer();

        timer.reset();
        fake.rewind(Duration::from_millis(500));

        assert!((timer.elapsed_seconds() + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn clock_is_read_once_per_reset_and_once_per_read() {
        let mut mock = MockPlatform::new();
        let origin = UNIX_EPOCH + Duration::from_secs(100);

        let mut sequence = mockall::Sequence::new();
        // Creation, reset, then one read.
        mock.expect_wall_clock_now()
            .times(2)
            .in_sequence(&mut sequence)
            .return_const(origin);
        mock.expect_wall_clock_now()
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(origin + Duration::from_millis(40));

        let mut timer = Timer::with_platform(PlatformFacade::from_mock(mock));
        timer.reset();

        assert!((timer.elapsed_seconds() - 0.040).abs() < TOLERANCE);
    }

    static_assertions::assert_impl_all!(Timer: Send, Sync);
}
