use rand::{Rng, rng};

use crate::{error::Result, rand::RandSource};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded from the operating system.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free and safe. This type does **not** store the RNG itself; it
/// simply accesses the thread-local generator on each call.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn try_rand(&self) -> Result<u64> {
        Ok(rng().random())
    }
}

impl RandSource<u128> for ThreadRandom {
    fn try_rand(&self) -> Result<u128> {
        Ok(rng().random())
    }
}
