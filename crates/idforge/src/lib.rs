//! Pluggable 128-bit identifier generation.
//!
//! Three strategies share the [`IdentityGenerator`] trait:
//!
//! - [`RandomGenerator`]: 128 uniformly random bits.
//! - [`SortableGenerator`]: a truncated timestamp prefix followed by random
//!   bits, so identifiers sort roughly by creation time.
//! - [`FlakeGenerator`]: timestamp, worker id and per-tick sequence, strictly
//!   increasing within one generator.
//!
//! ```
//! use idforge::{FlakeGenerator, FlakeId, IdentityGenerator, SystemClock};
//!
//! let generator = FlakeGenerator::new(42, SystemClock);
//! let a = generator.generate();
//! let b = generator.generate();
//! assert!(a < b);
//! assert_eq!(FlakeId::from(b).worker_id(), 42);
//! ```

mod config;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
