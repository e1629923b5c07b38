//! Startup-time strategy selection.
//!
//! A host picks one strategy when it boots and shares the resulting generator
//! for the rest of the process lifetime. [`GeneratorConfig`] describes that
//! choice and can be deserialized from configuration files when the `serde`
//! feature is enabled:
//!
//! ```json
//! { "strategy": "flake", "worker_id": 42, "epoch_millis": 1735689600000 }
//! ```

use core::{fmt, str::FromStr, time::Duration};
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    generator::{FlakeGenerator, RandomGenerator, SharedGenerator, SortableGenerator, WorkerId},
    rand::ThreadRandom,
    time::{MonotonicClock, SystemClock},
};

/// The clock a time-based strategy reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockKind {
    /// [`SystemClock`]: follows the wall clock, including adjustments.
    #[default]
    System,
    /// [`MonotonicClock`]: anchored once, never moves backward.
    Monotonic,
}

/// Which identifier strategy to build, and its parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "strategy", rename_all = "snake_case", deny_unknown_fields)
)]
pub enum GeneratorConfig {
    /// [`RandomGenerator`] backed by [`ThreadRandom`].
    #[default]
    Random,
    /// [`SortableGenerator`] backed by [`ThreadRandom`].
    Sortable {
        #[cfg_attr(feature = "serde", serde(default))]
        clock: ClockKind,
    },
    /// [`FlakeGenerator`].
    Flake {
        /// Explicit worker id (low 48 bits used); detected from the host's
        /// IPv4 addresses when absent.
        #[cfg_attr(feature = "serde", serde(default))]
        worker_id: Option<u64>,
        /// Epoch as milliseconds since the Unix epoch; absent or zero selects
        /// the Unix epoch.
        #[cfg_attr(feature = "serde", serde(default))]
        epoch_millis: Option<u64>,
        #[cfg_attr(feature = "serde", serde(default))]
        clock: ClockKind,
    },
}

impl GeneratorConfig {
    /// Builds the configured generator as a shareable handle.
    ///
    /// # Errors
    ///
    /// Fails only for [`GeneratorConfig::Flake`]:
    /// - without a `worker_id`, when no worker id can be derived from the host
    /// - with an `epoch_millis` the clock has not reached yet
    ///   ([`Error::InvalidConfig`])
    ///
    /// # Example
    /// ```
    /// use idforge::{ClockKind, FlakeId, GeneratorConfig, IdentityGenerator};
    ///
    /// let generator = GeneratorConfig::Flake {
    ///     worker_id: Some(7),
    ///     epoch_millis: None,
    ///     clock: ClockKind::Monotonic,
    /// }
    /// .build()
    /// .unwrap();
    ///
    /// assert_eq!(FlakeId::from(generator.generate()).worker_id(), 7);
    /// ```
    pub fn build(&self) -> Result<SharedGenerator> {
        let generator: SharedGenerator = match *self {
            Self::Random => Arc::new(RandomGenerator::new(ThreadRandom)),
            Self::Sortable { clock } => match clock {
                ClockKind::System => Arc::new(SortableGenerator::new(SystemClock, ThreadRandom)),
                ClockKind::Monotonic => {
                    Arc::new(SortableGenerator::new(MonotonicClock::new(), ThreadRandom))
                }
            },
            Self::Flake {
                worker_id,
                epoch_millis,
                clock,
            } => {
                let worker_id = match worker_id {
                    Some(id) => WorkerId::new(id),
                    None => WorkerId::detect()?,
                };
                let epoch = Duration::from_millis(epoch_millis.unwrap_or_default());
                match clock {
                    ClockKind::System => Arc::new(FlakeGenerator::try_with_epoch(
                        worker_id.get(),
                        epoch,
                        SystemClock,
                    )?),
                    ClockKind::Monotonic => Arc::new(FlakeGenerator::try_with_epoch(
                        worker_id.get(),
                        epoch,
                        MonotonicClock::new(),
                    )?),
                }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::info!(config = %self, "identifier generator configured");

        Ok(generator)
    }

    /// Returns the strategy name as used in configuration.
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sortable { .. } => "sortable",
            Self::Flake { .. } => "flake",
        }
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Sortable { clock } => write!(f, "sortable ({clock:?} clock)"),
            Self::Flake {
                worker_id,
                epoch_millis,
                clock,
            } => {
                write!(f, "flake (worker ")?;
                match worker_id {
                    Some(id) => write!(f, "{}", WorkerId::new(*id))?,
                    None => f.write_str("auto")?,
                }
                write!(
                    f,
                    ", epoch {} ms, {clock:?} clock)",
                    epoch_millis.unwrap_or_default()
                )
            }
        }
    }
}

impl FromStr for ClockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(Error::InvalidConfig(format!("unknown clock `{other}`"))),
        }
    }
}
