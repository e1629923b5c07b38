/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `idforge` can emit.
///
/// Generation is treated as always-available infrastructure: the infallible
/// [`IdentityGenerator::generate`] turns any of these into a panic, while
/// [`IdentityGenerator::try_generate`] hands them back as values.
///
/// [`IdentityGenerator::generate`]: crate::generator::IdentityGenerator::generate
/// [`IdentityGenerator::try_generate`]: crate::generator::IdentityGenerator::try_generate
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No non-loopback IPv4 address was found while deriving a worker id.
    #[error("no non-loopback IPv4 address available to derive a worker id")]
    NoWorkerAddress,

    /// The host's network interfaces could not be enumerated.
    #[error("failed to enumerate network interfaces: {0}")]
    AddressLookup(String),

    /// More identifiers were requested within one clock tick than the 16-bit
    /// sequence field can encode.
    #[error("sequence exhausted within clock tick {timestamp}")]
    SequenceOverflow {
        /// The tick whose sequence space ran out.
        timestamp: u64,
    },

    /// The operating system entropy source failed.
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    /// A textual identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
