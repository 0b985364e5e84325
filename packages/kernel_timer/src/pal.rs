//! Platform abstraction layer for wall-clock access.
//!
//! This module allows switching between the real system clock and fake or mock clocks
//! for testing purposes, so timing scenarios can be exercised deterministically.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
#[cfg(test)]
pub(crate) use abstractions::MockPlatform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
pub(crate) use real::{REAL_PLATFORM, RealPlatform};
