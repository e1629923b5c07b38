use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use idforge::{ClockKind, GeneratorConfig, Identifier, WorkerId};

/// Identifier strategy, as chosen on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 128 random bits.
    Random,
    /// Truncated timestamp prefix plus 80 random bits.
    Sortable,
    /// Timestamp, worker id and per-tick sequence.
    Flake,
}

/// Clock backing the time-based strategies.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Monotonic,
}

impl From<Clock> for ClockKind {
    fn from(clock: Clock) -> Self {
        match clock {
            Clock::System => Self::System,
            Clock::Monotonic => Self::Monotonic,
        }
    }
}

/// How each identifier is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `01234567-89ab-cdef-0011-223344556677`
    Hyphenated,
    /// `0123456789abcdef0011223344556677`
    Simple,
    /// The identifier as an unsigned 128-bit decimal integer.
    Decimal,
}

impl OutputFormat {
    pub fn render(self, id: Identifier) -> String {
        match self {
            Self::Hyphenated => id.to_string(),
            Self::Simple => format!("{id:x}"),
            Self::Decimal => id.to_raw().to_string(),
        }
    }
}

/// Runtime configuration for the `idforge` binary.
///
/// Every option can also be supplied through the environment (or a `.env`
/// file in the working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "idforge",
    version,
    about = "Print 128-bit identifiers from a random, sortable or flake generator"
)]
pub struct CliArgs {
    /// Generation strategy.
    ///
    /// Environment variable: `IDFORGE_STRATEGY`
    #[arg(long, env = "IDFORGE_STRATEGY", value_enum, default_value_t = Strategy::Random)]
    pub strategy: Strategy,

    /// Worker id for the flake strategy (at most 48 bits).
    ///
    /// Derived from the host's largest non-loopback IPv4 address when
    /// omitted.
    ///
    /// Environment variable: `IDFORGE_WORKER_ID`
    #[arg(long, env = "IDFORGE_WORKER_ID")]
    pub worker_id: Option<u64>,

    /// Epoch for the flake strategy, in milliseconds since the Unix epoch.
    ///
    /// Environment variable: `IDFORGE_EPOCH_MILLIS`
    #[arg(long, env = "IDFORGE_EPOCH_MILLIS")]
    pub epoch_millis: Option<u64>,

    /// Clock used by the sortable and flake strategies.
    ///
    /// Environment variable: `IDFORGE_CLOCK`
    #[arg(long, env = "IDFORGE_CLOCK", value_enum, default_value_t = Clock::System)]
    pub clock: Clock,

    /// Number of identifiers to print.
    ///
    /// Environment variable: `IDFORGE_COUNT`
    #[arg(short = 'n', long, env = "IDFORGE_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Output format.
    ///
    /// Environment variable: `IDFORGE_FORMAT`
    #[arg(long, env = "IDFORGE_FORMAT", value_enum, default_value_t = OutputFormat::Hyphenated)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
    pub count: usize,
    pub format: OutputFormat,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("IDFORGE_COUNT must be greater than 0");
        }

        if args.strategy != Strategy::Flake
            && (args.worker_id.is_some() || args.epoch_millis.is_some())
        {
            bail!(
                "IDFORGE_WORKER_ID and IDFORGE_EPOCH_MILLIS only apply to the flake strategy (got {:?})",
                args.strategy
            );
        }

        if let Some(worker_id) = args.worker_id.filter(|&id| id > WorkerId::MAX) {
            bail!(
                "IDFORGE_WORKER_ID ({worker_id}) exceeds the 48-bit worker id space (max = {})",
                WorkerId::MAX
            );
        }

        if let Some(epoch_millis) = args.epoch_millis {
            let now_millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the Unix epoch")?
                .as_millis();
            if u128::from(epoch_millis) > now_millis {
                bail!("IDFORGE_EPOCH_MILLIS ({epoch_millis}) lies in the future");
            }
        }

        let generator = match args.strategy {
            Strategy::Random => GeneratorConfig::Random,
            Strategy::Sortable => GeneratorConfig::Sortable {
                clock: args.clock.into(),
            },
            Strategy::Flake => GeneratorConfig::Flake {
                worker_id: args.worker_id,
                epoch_millis: args.epoch_millis,
                clock: args.clock.into(),
            },
        };

        Ok(Self {
            generator,
            count: args.count,
            format: args.format,
        })
    }
}
