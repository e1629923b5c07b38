#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::Result,
    generator::IdentityGenerator,
    id::Identifier,
    rand::{RandSource, ThreadRandom},
};

/// A generator that returns 128 random bits per call.
///
/// This is the default strategy. It carries no state besides its random
/// source and offers neither ordering nor a uniqueness guarantee beyond the
/// birthday bound of 128 random bits.
///
/// ## Features
/// - ✅ Thread-safe (delegated to the random source)
/// - ✅ No coordination, no clock
/// - ❌ Not time-ordered
///
/// ## See Also
/// - [`SortableGenerator`]
/// - [`FlakeGenerator`]
///
/// [`SortableGenerator`]: crate::generator::SortableGenerator
/// [`FlakeGenerator`]: crate::generator::FlakeGenerator
#[derive(Clone, Debug, Default)]
pub struct RandomGenerator<R = ThreadRandom>
where
    R: RandSource<u128>,
{
    rng: R,
}

impl<R> RandomGenerator<R>
where
    R: RandSource<u128>,
{
    /// Creates a new [`RandomGenerator`] drawing from `rng`.
    ///
    /// # Example
    /// ```
    /// use idforge::{IdentityGenerator, RandomGenerator, ThreadRandom};
    ///
    /// let generator = RandomGenerator::new(ThreadRandom);
    /// assert_ne!(generator.generate(), generator.generate());
    /// ```
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates the next identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the random source fails.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<Identifier> {
        self.rng.try_rand().map(Identifier::from_raw)
    }
}

impl<R> IdentityGenerator for RandomGenerator<R>
where
    R: RandSource<u128>,
{
    fn try_generate(&self) -> Result<Identifier> {
        self.try_generate()
    }
}
