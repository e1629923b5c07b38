use rand::{TryRngCore, rngs::OsRng};

use crate::{
    error::{Error, Result},
    rand::RandSource,
};

/// A `RandSource` that reads directly from the operating system's entropy
/// source on every call.
///
/// Slower than [`ThreadRandom`] (one syscall per value) but it reports
/// entropy failures as [`Error::Entropy`] rather than panicking inside the
/// RNG.
///
/// [`ThreadRandom`]: crate::rand::ThreadRandom
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl OsRandom {
    fn fill<const N: usize>() -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::Entropy(e.to_string()))?;
        Ok(bytes)
    }
}

impl RandSource<u64> for OsRandom {
    fn try_rand(&self) -> Result<u64> {
        Self::fill::<8>().map(u64::from_ne_bytes)
    }
}

impl RandSource<u128> for OsRandom {
    fn try_rand(&self) -> Result<u128> {
        Self::fill::<16>().map(u128::from_ne_bytes)
    }
}
