use std::sync::Arc;

use crate::error::Result;

/// A trait for random sources that return random integers.
///
/// This abstraction allows you to plug in a real random source or a
/// deterministic one in tests. Implementations are shared by every caller of
/// a generator, so they must tolerate concurrent use through `&self`.
///
/// The random type `T` is generic (typically `u64` or `u128`).
///
/// # Errors
///
/// Sources backed by the operating system report entropy failures instead of
/// silently weakening their output.
///
/// # Example
/// ```
/// use idforge::{RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn try_rand(&self) -> Result<u128> {
///         Ok(1234)
///     }
/// }
///
/// assert_eq!(FixedRand.try_rand().unwrap(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn try_rand(&self) -> Result<T>;
}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for &R {
    fn try_rand(&self) -> Result<T> {
        (**self).try_rand()
    }
}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for Arc<R> {
    fn try_rand(&self) -> Result<T> {
        (**self).try_rand()
    }
}
