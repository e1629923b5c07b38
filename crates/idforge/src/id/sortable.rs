use core::fmt;

use crate::id::Identifier;

/// The bit layout of identifiers produced by [`SortableGenerator`].
///
/// - 48 bits timestamp: the high-order 48 bits of the 64-bit tick count
///   (100 ns units since the Unix epoch), i.e. `ticks >> 16`
/// - 80 bits random
///
/// ```text
///  Bit Index:  127            80 79           0
///              +----------------+-------------+
///  Field:      | timestamp (48) | random (80) |
///              +----------------+-------------+
///              |<-- MSB -- 128 bits -- LSB -->|
/// ```
///
/// One timestamp unit is 65,536 ticks (6.5536 ms). Identifiers inside the same
/// unit are ordered only by their random suffix.
///
/// [`SortableGenerator`]: crate::generator::SortableGenerator
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SortableId {
    id: u128,
}

impl SortableId {
    pub const TIMESTAMP_BITS: u32 = 48;
    pub const RANDOM_BITS: u32 = 80;

    pub const RANDOM_SHIFT: u32 = 0;
    pub const TIMESTAMP_SHIFT: u32 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

    pub const TIMESTAMP_MASK: u128 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const RANDOM_MASK: u128 = (1 << Self::RANDOM_BITS) - 1;

    /// Number of low-order tick bits discarded by the truncation.
    pub const TICK_TRUNCATION: u32 = u64::BITS - Self::TIMESTAMP_BITS;

    /// Builds an identifier from a full 64-bit tick count, keeping its
    /// high-order 48 bits, and the low 80 bits of `random`.
    #[must_use]
    pub const fn from_ticks(ticks: u64, random: u128) -> Self {
        Self::from_components(ticks >> Self::TICK_TRUNCATION, random)
    }

    /// Packs an already-truncated timestamp and a random value; both are
    /// masked to their field width.
    #[must_use]
    pub const fn from_components(timestamp: u64, random: u128) -> Self {
        let t = (timestamp as u128 & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
        Self { id: t | r }
    }

    /// Extracts the truncated 48-bit timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        ((self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK) as u64
    }

    /// Returns the smallest tick count that maps to this identifier's
    /// timestamp.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.timestamp() << Self::TICK_TRUNCATION
    }

    /// Extracts the 80-bit random suffix.
    #[must_use]
    pub const fn random(&self) -> u128 {
        (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
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

impl From<Identifier> for SortableId {
    fn from(id: Identifier) -> Self {
        Self::from_raw(id.to_raw())
    }
}

impl From<SortableId> for Identifier {
    fn from(id: SortableId) -> Self {
        Self::from_raw(id.to_raw())
    }
}

impl fmt::Display for SortableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Identifier::from(*self).fmt(f)
    }
}

impl fmt::Debug for SortableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableId")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("random", &format_args!("0x{:020x}", self.random()))
            .finish()
    }
}
