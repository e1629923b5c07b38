#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::Result,
    generator::IdentityGenerator,
    id::{Identifier, SortableId},
    rand::{RandSource, ThreadRandom},
    time::{SystemClock, TimeSource},
};

/// A timestamp-prefixed generator with an 80-bit random suffix.
///
/// Each identifier starts with the high-order 48 bits of the current tick
/// count (see [`SortableId`]), so identifiers generated more than one
/// truncated unit (6.5536 ms) apart sort by generation time, both numerically
/// and byte-wise. Within one unit, uniqueness rests on the random suffix and
/// is probabilistic.
///
/// The generator itself holds no mutable state; the random source is shared by
/// all callers and must be safe for concurrent use.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lexicographically sortable across time units
/// - ❌ Not collision-free by construction
///
/// ## See Also
/// - [`RandomGenerator`]
/// - [`FlakeGenerator`]
///
/// [`RandomGenerator`]: crate::generator::RandomGenerator
/// [`FlakeGenerator`]: crate::generator::FlakeGenerator
#[derive(Clone, Debug, Default)]
pub struct SortableGenerator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    time: T,
    rng: R,
}

impl<T, R> SortableGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    /// Creates a new [`SortableGenerator`] with the provided time source and
    /// random source.
    ///
    /// # Example
    /// ```
    /// use idforge::{IdentityGenerator, SortableGenerator, SystemClock, ThreadRandom};
    ///
    /// let generator = SortableGenerator::new(SystemClock, ThreadRandom);
    /// let id = generator.generate();
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the random source fails.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<Identifier> {
        let ticks = self.time.current_ticks();
        let random = self.rng.try_rand()?;
        Ok(SortableId::from_ticks(ticks, random).into())
    }
}

impl<T, R> IdentityGenerator for SortableGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u128>,
{
    fn try_generate(&self) -> Result<Identifier> {
        self.try_generate()
    }
}
