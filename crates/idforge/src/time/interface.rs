use core::time::Duration;
use std::sync::Arc;

/// Nanoseconds per clock tick.
pub const NANOS_PER_TICK: u64 = 100;

/// Clock ticks per millisecond.
pub const TICKS_PER_MILLI: u64 = 1_000_000 / NANOS_PER_TICK;

/// The default epoch: Thursday, January 1, 1970 00:00:00 UTC.
pub const DEFAULT_EPOCH: Duration = Duration::ZERO;

/// A trait for clocks that report the current UTC time as a tick count.
///
/// A tick is 100 ns and counting starts at the Unix epoch. This abstraction
/// allows you to plug in the real system clock, a monotonic clock, or a
/// fabricated clock in tests.
///
/// # Example
///
/// ```
/// use idforge::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_ticks(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_ticks(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the number of 100 ns ticks elapsed since the Unix epoch.
    fn current_ticks(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_ticks(&self) -> u64 {
        (**self).current_ticks()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_ticks(&self) -> u64 {
        (**self).current_ticks()
    }
}

/// Converts a duration into whole ticks, saturating at `u64::MAX`.
#[must_use]
pub fn duration_to_ticks(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos() / u128::from(NANOS_PER_TICK)).unwrap_or(u64::MAX)
}

/// Converts ticks back into a duration.
#[must_use]
pub const fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_nanos(ticks.saturating_mul(NANOS_PER_TICK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_conversions() {
        assert_eq!(duration_to_ticks(Duration::from_millis(1)), TICKS_PER_MILLI);
        assert_eq!(duration_to_ticks(Duration::from_nanos(199)), 1);
        assert_eq!(duration_to_ticks(Duration::MAX), u64::MAX);
        assert_eq!(ticks_to_duration(10_000), Duration::from_millis(1));
    }
}
