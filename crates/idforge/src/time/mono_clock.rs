use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::time::{TimeSource, duration_to_ticks};

/// A monotonic time source aligned to the wall clock once, at construction.
///
/// The wall-clock reading taken by [`MonotonicClock::new`] anchors the tick
/// count to the Unix epoch; after that every reading adds the elapsed
/// [`Instant`] time. Readings therefore never go backward, even if the system
/// clock is adjusted externally, at the cost of drifting from wall time by
/// whatever adjustments happen while the clock is alive.
///
/// Clones share the same anchor.
///
/// # Example
///
/// ```
/// use idforge::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_ticks();
/// std::thread::sleep(std::time::Duration::from_millis(1));
/// assert!(clock.current_ticks() > a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: u64, // in ticks
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current system time.
    ///
    /// # Panics
    ///
    /// Panics if the current system time is earlier than the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH");
        Self {
            start,
            epoch_offset: duration_to_ticks(system_now),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_ticks(&self) -> u64 {
        self.epoch_offset
            .saturating_add(duration_to_ticks(self.start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SystemClock;

    #[test]
    fn never_goes_backward() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_ticks();
        for _ in 0..10_000 {
            let now = clock.current_ticks();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn starts_near_wall_clock() {
        let wall = SystemClock.current_ticks();
        let mono = MonotonicClock::new().current_ticks();
        // Within one second of each other.
        assert!(mono.abs_diff(wall) < 10_000_000);
    }
}
