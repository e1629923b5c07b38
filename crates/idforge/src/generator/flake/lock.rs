use core::{cmp::Ordering, time::Duration};
use std::sync::Arc;

use crossbeam_utils::Backoff;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    generator::{IdentityGenerator, Mutex, WorkerId, lock},
    id::{FlakeId, Identifier},
    time::{DEFAULT_EPOCH, SystemClock, TimeSource, duration_to_ticks, ticks_to_duration},
};

/// Mutable clock/sequence state, only ever touched under the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FlakeState {
    /// Most recent clock reading handed out; `None` until the first call.
    last_timestamp: Option<u64>,
    sequence: u16,
}

/// A decentralized, k-ordered identifier generator.
///
/// Every identifier combines (see [`FlakeId`]):
/// - 64-bit timestamp: clock ticks since the configured epoch
/// - 48-bit worker id: distinguishes hosts sharing an epoch
/// - 16-bit sequence: 0 on the first identifier of a tick, then +1 per call
///
/// The timestamp/sequence state lives behind one mutex per generator. Each
/// call reads the clock, updates the state and packs the identifier inside
/// that critical section, so concurrent callers never observe the same
/// `(timestamp, sequence)` pair and identifiers come out in non-decreasing
/// order.
///
/// If the clock moves backward, the call spins until the clock has caught up
/// with the last timestamp it handed out. The calling thread (and any caller
/// queued on the lock) is blocked for the length of the regression.
///
/// Clones share the same state.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Collision-free within one generator
/// - ✅ Non-decreasing timestamps, even across clock regressions
///
/// ## See Also
/// - [`RandomGenerator`]
/// - [`SortableGenerator`]
///
/// [`RandomGenerator`]: crate::generator::RandomGenerator
/// [`SortableGenerator`]: crate::generator::SortableGenerator
pub struct FlakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<FlakeState>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<FlakeState>>,
    worker_id: WorkerId,
    epoch: u64, // in ticks
    time: T,
}

impl<T> FlakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`FlakeGenerator`] for `worker_id`, measuring time from
    /// the default epoch (the Unix epoch).
    ///
    /// Only the low 48 bits of `worker_id` are used.
    ///
    /// # Example
    /// ```
    /// use idforge::{FlakeGenerator, FlakeId, IdentityGenerator, SystemClock};
    ///
    /// let generator = FlakeGenerator::new(42, SystemClock);
    /// let id = FlakeId::from(generator.generate());
    /// assert_eq!(id.worker_id(), 42);
    /// ```
    pub fn new(worker_id: u64, time: T) -> Self {
        Self::with_epoch(worker_id, DEFAULT_EPOCH, time)
    }

    /// Creates a new [`FlakeGenerator`] measuring time from `epoch`, given as
    /// the offset from the Unix epoch.
    ///
    /// A zero `epoch` selects the default epoch.
    ///
    /// `epoch` must not lie ahead of `time`. Timestamps are stored as the
    /// unsigned distance from the epoch, so readings taken before it wrap
    /// around and sort after every later identifier. Use
    /// [`Self::try_with_epoch`] when the epoch comes from configuration.
    pub fn with_epoch(worker_id: u64, epoch: Duration, time: T) -> Self {
        Self::from_components(None, 0, worker_id, epoch, time)
    }

    /// Like [`Self::with_epoch`], but rejects an epoch that `time` has not
    /// reached yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `epoch` is later than the current
    /// reading of `time`.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use idforge::{Error, FlakeGenerator, SystemClock};
    ///
    /// let year_3000 = Duration::from_secs(32_503_680_000);
    /// assert!(matches!(
    ///     FlakeGenerator::try_with_epoch(1, year_3000, SystemClock),
    ///     Err(Error::InvalidConfig(_))
    /// ));
    /// ```
    pub fn try_with_epoch(worker_id: u64, epoch: Duration, time: T) -> Result<Self> {
        let epoch_ticks = duration_to_ticks(epoch);
        let now = time.current_ticks();
        if epoch_ticks > now {
            return Err(Error::InvalidConfig(format!(
                "epoch {} ms lies ahead of the clock ({} ms)",
                epoch.as_millis(),
                ticks_to_duration(now).as_millis()
            )));
        }
        Ok(Self::with_epoch(worker_id, epoch, time))
    }

    /// Creates a new [`FlakeGenerator`] whose worker id is derived from the
    /// host's non-loopback IPv4 addresses (see [`WorkerId::detect`]).
    ///
    /// # Errors
    ///
    /// Fails if no usable address is found; a generator without a
    /// distinguishing identity is not safe to use across hosts.
    pub fn detect(time: T) -> Result<Self> {
        Ok(Self::new(WorkerId::detect()?.get(), time))
    }

    /// Creates a generator from explicit state.
    ///
    /// This constructor is primarily useful for tests and advanced use cases
    /// that need to control the starting point of the generator.
    ///
    /// # Parameters
    /// - `last_timestamp`: The last clock reading the generator handed out,
    ///   or `None` for a fresh generator
    /// - `sequence`: The sequence used with `last_timestamp`
    /// - `worker_id`: The worker identifier (low 48 bits)
    /// - `epoch`: Offset of the epoch from the Unix epoch; zero selects the
    ///   default. Must not lie ahead of `time` (see [`Self::with_epoch`])
    /// - `time`: A [`TimeSource`] used to fetch the current time
    ///
    /// # ⚠️ Note
    /// In typical use cases, you should prefer [`Self::new`].
    pub fn from_components(
        last_timestamp: Option<u64>,
        sequence: u16,
        worker_id: u64,
        epoch: Duration,
        time: T,
    ) -> Self {
        let epoch = if epoch.is_zero() { DEFAULT_EPOCH } else { epoch };
        let state = FlakeState {
            last_timestamp,
            sequence,
        };
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            worker_id: WorkerId::new(worker_id),
            epoch: duration_to_ticks(epoch),
            time,
        }
    }

    /// Returns the worker id embedded in every identifier.
    pub const fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    /// Returns the epoch as an offset from the Unix epoch.
    pub const fn epoch(&self) -> Duration {
        ticks_to_duration(self.epoch)
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    /// - [`Error::SequenceOverflow`] if all 65,536 sequence values of the
    ///   current tick are used up. The state is left untouched, so generation
    ///   resumes once the clock advances.
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (std mutex only).
    ///
    /// # Example
    /// ```
    /// use idforge::{FlakeGenerator, FlakeId, MonotonicClock};
    ///
    /// let generator = FlakeGenerator::new(7, MonotonicClock::new());
    /// let a = FlakeId::from(generator.try_generate().unwrap());
    /// let b = FlakeId::from(generator.try_generate().unwrap());
    /// assert!(a < b);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<Identifier> {
        let mut state = lock(&self.state)?;

        let now = self.time.current_ticks();
        let (timestamp, sequence) = match state.last_timestamp {
            None => (now, 0),
            Some(last) => match now.cmp(&last) {
                Ordering::Greater => (now, 0),
                Ordering::Equal => (last, Self::next_sequence(last, state.sequence)?),
                Ordering::Less => {
                    let now = self.cold_clock_behind(now, last);
                    if now == last {
                        (last, Self::next_sequence(last, state.sequence)?)
                    } else {
                        (now, 0)
                    }
                }
            },
        };

        state.last_timestamp = Some(timestamp);
        state.sequence = sequence;

        let delta = timestamp.wrapping_sub(self.epoch);
        Ok(FlakeId::from_components(delta, self.worker_id.get(), sequence).into())
    }

    #[inline]
    fn next_sequence(timestamp: u64, sequence: u16) -> Result<u16> {
        sequence
            .checked_add(1)
            .ok_or(Error::SequenceOverflow { timestamp })
    }

    /// Spins until the clock reaches `last` again and returns that reading.
    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, now: u64, last: u64) -> u64 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            behind_by = last - now,
            "clock moved backwards; waiting for it to catch up"
        );

        let backoff = Backoff::new();
        let mut now = now;
        while now < last {
            backoff.snooze();
            now = self.time.current_ticks();
        }
        now
    }
}

impl<T> Clone for FlakeGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            worker_id: self.worker_id,
            epoch: self.epoch,
            time: self.time.clone(),
        }
    }
}

impl<T> core::fmt::Debug for FlakeGenerator<T>
where
    T: TimeSource + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlakeGenerator")
            .field("worker_id", &self.worker_id)
            .field("epoch", &self.epoch())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl<T> IdentityGenerator for FlakeGenerator<T>
where
    T: TimeSource,
{
    fn try_generate(&self) -> Result<Identifier> {
        self.try_generate()
    }
}
