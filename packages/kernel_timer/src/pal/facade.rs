use std::fmt::{self, Debug};
#[cfg(test)]
use std::sync::Arc;
use std::time::SystemTime;

#[cfg(test)]
use crate::pal::{FakePlatform, MockPlatform};
use crate::pal::{Platform, REAL_PLATFORM, RealPlatform};

/// Dispatches clock queries to the real platform or, in tests, to a fake or mock one.
#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Real(&'static RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(&REAL_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn fake(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Platform for PlatformFacade {
    fn wall_clock_now(&self) -> SystemTime {
        match self {
            Self::Real(p) => p.wall_clock_now(),
            #[cfg(test)]
            Self::Fake(p) => p.wall_clock_now(),
            #[cfg(test)]
            Self::Mock(p) => p.wall_clock_now(),
        }
    }
}

impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(p) => p.fmt(f),
            #[cfg(test)]
            Self::Fake(p) => p.fmt(f),
            #[cfg(test)]
            Self::Mock(p) => p.fmt(f),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn fake_variant_forwards_to_fake_platform() {
        let fake = FakePlatform::new();
        let facade = PlatformFacade::fake(fake.clone());

        fake.advance(Duration::from_millis(25));

        assert_eq!(facade.wall_clock_now(), fake.wall_clock_now());
    }

    #[test]
    fn mock_variant_forwards_to_mock_platform() {
        let mut mock = MockPlatform::new();
        mock.expect_wall_clock_now()
            .times(1)
            .return_const(UNIX_EPOCH + Duration::from_secs(42));

        let facade = PlatformFacade::from_mock(mock);

        assert_eq!(
            facade.wall_clock_now(),
            UNIX_EPOCH + Duration::from_secs(42)
        );
    }

    #[test]
    fn clones_share_the_fake_clock() {
        let fake = FakePlatform::new();
        let facade1 = PlatformFacade::fake(fake.clone());
        let facade2 = facade1.clone();

        fake.advance(Duration::from_secs(3));

        assert_eq!(facade1.wall_clock_now(), facade2.wall_clock_now());
    }
}
