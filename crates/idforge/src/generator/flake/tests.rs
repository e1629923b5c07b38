use core::time::Duration;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::scope;

use crate::{
    Error, FlakeGenerator, FlakeId, Identifier, IdentityGenerator, MonotonicClock, SystemClock,
    TICKS_PER_MILLI, TimeSource, WorkerId,
};

struct MockTime {
    ticks: u64,
}

impl TimeSource for MockTime {
    fn current_ticks(&self) -> u64 {
        self.ticks
    }
}

/// A clock the test moves by hand.
#[derive(Default)]
struct ManualTime {
    ticks: AtomicU64,
}

impl ManualTime {
    fn set(&self, ticks: u64) {
        self.ticks.store(ticks, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTime {
    fn current_ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

/// Replays a fixed script of readings, one per call, then repeats the last.
struct ScriptedTime {
    values: Vec<u64>,
    index: AtomicUsize,
}

impl ScriptedTime {
    fn new(values: Vec<u64>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl TimeSource for ScriptedTime {
    fn current_ticks(&self) -> u64 {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.values[i.min(self.values.len() - 1)]
    }
}

fn flake<G: IdentityGenerator>(generator: &G) -> FlakeId {
    FlakeId::from(generator.generate())
}

#[test]
fn sequence_increments_within_same_tick() {
    let generator = FlakeGenerator::new(0, MockTime { ticks: 42 });

    let id1 = flake(&generator);
    let id2 = flake(&generator);
    let id3 = flake(&generator);

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id2.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn first_identifier_at_tick_zero_starts_sequence_at_zero() {
    let generator = FlakeGenerator::new(1, MockTime { ticks: 0 });
    let id = flake(&generator);
    assert_eq!(id.timestamp(), 0);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn sequence_resets_when_clock_advances() {
    let clock = Arc::new(ManualTime::default());
    clock.set(42);
    let generator = FlakeGenerator::new(1, Arc::clone(&clock));

    assert_eq!(flake(&generator).sequence(), 0);
    assert_eq!(flake(&generator).sequence(), 1);

    clock.set(43);
    let id = flake(&generator);
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn sequence_overflow_is_reported() {
    let generator = FlakeGenerator::from_components(
        Some(42),
        FlakeId::max_sequence(),
        0,
        Duration::ZERO,
        MockTime { ticks: 42 },
    );
    assert_eq!(
        generator.try_generate(),
        Err(Error::SequenceOverflow { timestamp: 42 })
    );
    // State is untouched; the tick is still exhausted.
    assert_eq!(
        generator.try_generate(),
        Err(Error::SequenceOverflow { timestamp: 42 })
    );
}

#[test]
#[should_panic(expected = "sequence exhausted")]
fn sequence_overflow_is_fatal_through_generate() {
    let generator = FlakeGenerator::from_components(
        Some(42),
        FlakeId::max_sequence(),
        0,
        Duration::ZERO,
        MockTime { ticks: 42 },
    );
    let _ = generator.generate();
}

#[test]
fn exhausts_full_sequence_then_rolls_over() {
    let clock = Arc::new(ManualTime::default());
    clock.set(42);
    let generator = FlakeGenerator::new(1, Arc::clone(&clock));

    for i in 0..=FlakeId::max_sequence() {
        let id = flake(&generator);
        assert_eq!(id.sequence(), i);
        assert_eq!(id.timestamp(), 42);
    }
    assert_eq!(
        generator.try_generate(),
        Err(Error::SequenceOverflow { timestamp: 42 })
    );

    clock.set(43);
    let id = flake(&generator);
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn waits_out_clock_regression_to_a_later_tick() {
    // 100 is handed out, then the clock jumps back to 90 and recovers at 120.
    let clock = Arc::new(ScriptedTime::new(vec![100, 90, 95, 99, 120]));
    let generator = FlakeGenerator::new(1, Arc::clone(&clock));

    let first = flake(&generator);
    assert_eq!((first.timestamp(), first.sequence()), (100, 0));

    let second = flake(&generator);
    assert_eq!((second.timestamp(), second.sequence()), (120, 0));
    assert_eq!(clock.reads(), 5);
    assert!(first < second);
}

#[test]
fn waits_out_clock_regression_to_the_same_tick() {
    let clock = Arc::new(ScriptedTime::new(vec![100, 90, 100, 101]));
    let generator = FlakeGenerator::new(1, Arc::clone(&clock));

    let a = flake(&generator);
    let b = flake(&generator);
    let c = flake(&generator);

    assert_eq!((a.timestamp(), a.sequence()), (100, 0));
    assert_eq!((b.timestamp(), b.sequence()), (100, 1));
    assert_eq!((c.timestamp(), c.sequence()), (101, 0));
    assert!(a < b && b < c);
}

#[test]
fn worker_bytes_are_constant() {
    let generator = FlakeGenerator::new(0x0A0B_0C0D_0E0F, SystemClock);
    for _ in 0..1_000 {
        let id = generator.generate();
        assert_eq!(&id.to_bytes()[8..14], &[0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F]);
        assert_eq!(FlakeId::from(id).worker_id(), 0x0A0B_0C0D_0E0F);
    }
}

#[test]
fn oversized_worker_id_is_truncated() {
    let generator = FlakeGenerator::new(0xFFFF_1234_5678_9ABC, MockTime { ticks: 7 });
    assert_eq!(generator.worker_id(), WorkerId::new(0x1234_5678_9ABC));
    assert_eq!(flake(&generator).worker_id(), 0x1234_5678_9ABC);
}

#[test]
fn output_is_deterministic() {
    let epoch = Duration::from_secs(1_577_836_800); // 2020-01-01T00:00:00Z
    let now = 1_577_836_800 * 1_000 * TICKS_PER_MILLI + 0x0102_0304;
    let make = || FlakeGenerator::with_epoch(0x0A0B_0C0D_0E0F, epoch, MockTime { ticks: now });

    let run = || {
        let generator = make();
        (0..3).map(|_| generator.generate()).collect::<Vec<_>>()
    };

    let ids = run();
    assert_eq!(ids, run());
    assert_eq!(
        ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
        [
            "00000000-0102-0304-0a0b-0c0d0e0f0000",
            "00000000-0102-0304-0a0b-0c0d0e0f0001",
            "00000000-0102-0304-0a0b-0c0d0e0f0002",
        ]
    );
}

#[test]
fn zero_epoch_selects_default_epoch() {
    let generator = FlakeGenerator::with_epoch(1, Duration::ZERO, MockTime { ticks: 5_000 });
    assert_eq!(generator.epoch(), Duration::ZERO);
    assert_eq!(flake(&generator).timestamp(), 5_000);
}

#[test]
fn timestamp_is_measured_from_epoch() {
    let epoch = Duration::from_millis(2);
    let generator = FlakeGenerator::with_epoch(1, epoch, MockTime { ticks: 50_000 });
    assert_eq!(generator.epoch(), epoch);
    assert_eq!(flake(&generator).timestamp(), 50_000 - 2 * TICKS_PER_MILLI);
}

fn run_generator_monotonic<G: IdentityGenerator>(generator: &G) {
    let mut last_timestamp = 0;
    let mut expected_sequence = 0u16;

    for _ in 0..100_000 {
        let id = flake(generator);
        let ts = id.timestamp();
        if ts > last_timestamp {
            expected_sequence = 0;
        }

        assert!(ts >= last_timestamp);
        assert_eq!(id.worker_id(), 1);
        assert_eq!(id.sequence(), expected_sequence);

        last_timestamp = ts;
        expected_sequence += 1;
    }
}

#[test]
fn system_clock_sequence_increments() {
    run_generator_monotonic(&FlakeGenerator::new(1, SystemClock));
}

#[test]
fn monotonic_clock_sequence_increments() {
    run_generator_monotonic(&FlakeGenerator::new(1, MonotonicClock::new()));
}

#[test]
fn threaded_generation_is_unique() {
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 20_000;
    const TOTAL_IDS: usize = THREADS * IDS_PER_THREAD;

    let generator = FlakeGenerator::new(0, MonotonicClock::new());
    let seen: Mutex<HashSet<Identifier>> = Mutex::new(HashSet::with_capacity(TOTAL_IDS));

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let mut local = Vec::with_capacity(IDS_PER_THREAD);
                let mut last = None;
                for _ in 0..IDS_PER_THREAD {
                    let id = generator.generate();
                    // Each thread observes its own calls in order.
                    assert!(last.is_none_or(|prev| prev < id));
                    last = Some(id);
                    local.push(id);
                }
                seen.lock().unwrap().extend(local);
            });
        }
    });

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), TOTAL_IDS, "Expected {TOTAL_IDS} unique IDs");

    let pairs: HashSet<(u64, u16)> = seen
        .iter()
        .map(|&id| {
            let id = FlakeId::from(id);
            (id.timestamp(), id.sequence())
        })
        .collect();
    assert_eq!(pairs.len(), TOTAL_IDS);
}

#[test]
fn clones_share_state() {
    let clock = Arc::new(ManualTime::default());
    clock.set(9);
    let generator = FlakeGenerator::new(3, clock);
    let clone = generator.clone();

    assert_eq!(flake(&generator).sequence(), 0);
    assert_eq!(flake(&clone).sequence(), 1);
    assert_eq!(flake(&generator).sequence(), 2);
}

#[test]
fn epoch_ahead_of_clock_is_rejected() {
    let clock = Arc::new(ManualTime::default());
    clock.set(TICKS_PER_MILLI);

    let result = FlakeGenerator::try_with_epoch(1, Duration::from_millis(2), Arc::clone(&clock));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn epoch_reached_by_clock_keeps_timestamps_ordered() {
    let clock = Arc::new(ManualTime::default());
    clock.set(2 * TICKS_PER_MILLI);

    let generator =
        FlakeGenerator::try_with_epoch(1, Duration::from_millis(2), Arc::clone(&clock)).unwrap();
    let a = flake(&generator);
    clock.set(3 * TICKS_PER_MILLI);
    let b = flake(&generator);

    assert_eq!(a.timestamp(), 0);
    assert_eq!(b.timestamp(), TICKS_PER_MILLI);
    assert!(a < b);
}

/// Panics on the first reading, then behaves like a fixed clock.
#[cfg(not(feature = "parking-lot"))]
#[derive(Default)]
struct PanicOnce {
    fired: std::sync::atomic::AtomicBool,
}

#[cfg(not(feature = "parking-lot"))]
impl TimeSource for PanicOnce {
    fn current_ticks(&self) -> u64 {
        if !self.fired.swap(true, Ordering::SeqCst) {
            panic!("clock failure");
        }
        42
    }
}

#[test]
#[cfg(not(feature = "parking-lot"))]
fn panic_under_lock_poisons_generator() {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    let generator = FlakeGenerator::new(1, PanicOnce::default());

    let first = catch_unwind(AssertUnwindSafe(|| generator.try_generate()));
    assert!(first.is_err());
    assert_eq!(generator.try_generate(), Err(Error::LockPoisoned));
}

#[test]
fn detected_worker_id_fits_48_bits() {
    match FlakeGenerator::detect(SystemClock) {
        Ok(generator) => {
            assert!(generator.worker_id().get() <= WorkerId::MAX);
            assert_eq!(flake(&generator).worker_id(), generator.worker_id().get());
        }
        Err(e) => assert!(
            matches!(e, Error::NoWorkerAddress | Error::AddressLookup(_)),
            "unexpected error: {e}"
        ),
    }
}
