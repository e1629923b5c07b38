use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::{TimeSource, duration_to_ticks};

/// A wall-clock time source backed by [`SystemTime::now`].
///
/// Readings follow the operating system clock, so they can move backward when
/// the clock is adjusted (NTP steps, manual changes). [`FlakeGenerator`]
/// absorbs such regressions by waiting for the clock to catch up.
///
/// # Panics
///
/// Reading the clock panics if the system time is earlier than the Unix
/// epoch; generation treats an unreadable clock as fatal.
///
/// [`FlakeGenerator`]: crate::generator::FlakeGenerator
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_ticks(&self) -> u64 {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH");
        duration_to_ticks(since_epoch)
    }
}
