use core::fmt;

use crate::id::Identifier;

/// The bit layout of identifiers produced by [`FlakeGenerator`].
///
/// - 64 bits timestamp (clock ticks elapsed since the generator's epoch)
/// - 48 bits worker id
/// - 16 bits sequence
///
/// ```text
///  Bit Index:  127             64 63              16 15             0
///              +-----------------+------------------+----------------+
///  Field:      | timestamp (64)  | worker id (48)   | sequence (16)  |
///              +-----------------+------------------+----------------+
///              |<----------- MSB ---- 128 bits ---- LSB ------------>|
/// ```
///
/// Rendered in the hyphenated text form, the first three groups carry the
/// high 32, middle 16 and low 16 bits of the timestamp, the worker id bytes
/// follow most significant first, and the sequence closes the value in
/// big-endian order.
///
/// [`FlakeGenerator`]: crate::generator::FlakeGenerator
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FlakeId {
    id: u128,
}

impl FlakeId {
    pub const TIMESTAMP_BITS: u32 = 64;
    pub const WORKER_ID_BITS: u32 = 48;
    pub const SEQUENCE_BITS: u32 = 16;

    pub const SEQUENCE_SHIFT: u32 = 0;
    pub const WORKER_ID_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::WORKER_ID_SHIFT + Self::WORKER_ID_BITS;

    pub const TIMESTAMP_MASK: u128 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const WORKER_ID_MASK: u128 = (1 << Self::WORKER_ID_BITS) - 1;
    pub const SEQUENCE_MASK: u128 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Packs the three components. Out-of-range worker ids are truncated to
    /// their low 48 bits.
    #[must_use]
    pub const fn from_components(timestamp: u64, worker_id: u64, sequence: u16) -> Self {
        let t = (timestamp as u128 & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let w = (worker_id as u128 & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let s = (sequence as u128 & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self { id: t | w | s }
    }

    /// Extracts the timestamp (ticks since the epoch).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        ((self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK) as u64
    }

    /// Extracts the 48-bit worker id.
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        ((self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK) as u64
    }

    /// Extracts the per-tick sequence.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Returns the maximum representable sequence value.
    #[must_use]
    pub const fn max_sequence() -> u16 {
        Self::SEQUENCE_MASK as u16
    }

    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }
}

impl From<Identifier> for FlakeId {
    fn from(id: Identifier) -> Self {
        Self::from_raw(id.to_raw())
    }
}

impl From<FlakeId> for Identifier {
    fn from(id: FlakeId) -> Self {
        Self::from_raw(id.to_raw())
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Identifier::from(*self).fmt(f)
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("worker_id", &format_args!("0x{:012x}", self.worker_id()))
            .field("sequence", &self.sequence())
            .finish()
    }
}
