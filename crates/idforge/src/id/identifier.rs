use core::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    rand::{RandSource, ThreadRandom},
};

/// An opaque 128-bit identifier.
///
/// Every generator in this crate returns an `Identifier`. Its interpretation
/// depends on the strategy that produced it (see [`FlakeId`] and
/// [`SortableId`]); no compatibility between strategies is implied.
///
/// Ordering compares the underlying `u128`, which is the same as comparing
/// the big-endian bytes returned by [`Identifier::to_bytes`].
///
/// The [`Display`] form is the familiar hyphenated `8-4-4-4-12` hex layout:
///
/// ```
/// use idforge::Identifier;
///
/// let id = Identifier::from_raw(0x0123_4567_89ab_cdef_0011_2233_4455_6677);
/// assert_eq!(id.to_string(), "01234567-89ab-cdef-0011-223344556677");
/// assert_eq!(format!("{id:x}"), "0123456789abcdef0011223344556677");
/// ```
///
/// [`FlakeId`]: crate::id::FlakeId
/// [`SortableId`]: crate::id::SortableId
/// [`Display`]: core::fmt::Display
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Identifier {
    id: u128,
}

impl Identifier {
    /// The all-zero identifier.
    pub const NIL: Self = Self { id: 0 };

    /// Converts a raw `u128` into an identifier.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// Returns the raw `u128` value.
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Builds an identifier from its 16 big-endian bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self::from_raw(u128::from_be_bytes(bytes))
    }

    /// Returns the 16 big-endian bytes of this identifier.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    /// Returns `true` if every bit is zero.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.id == 0
    }

    /// Generates a fresh random identifier using [`ThreadRandom`].
    ///
    /// This is the fallback for hosts that have no generator configured.
    #[must_use]
    pub fn random() -> Self {
        match ThreadRandom.try_rand() {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => panic!("random identifier generation failed: {e}"),
        }
    }
}

impl From<u128> for Identifier {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Identifier> for u128 {
    fn from(id: Identifier) -> Self {
        id.to_raw()
    }
}

impl From<[u8; 16]> for Identifier {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Identifier> for [u8; 16] {
    fn from(id: Identifier) -> Self {
        id.to_bytes()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (id >> 96) as u32,
            (id >> 80) as u16,
            (id >> 64) as u16,
            (id >> 48) as u16,
            (id & 0xFFFF_FFFF_FFFF) as u64,
        )
    }
}

impl fmt::LowerHex for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.id)
    }
}

impl fmt::UpperHex for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032X}", self.id)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Parses either the hyphenated `8-4-4-4-12` form or 32 bare hex digits.
    /// Hex digits are case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let simple: String = match s.len() {
            32 => s.to_owned(),
            36 => {
                let groups: Vec<&str> = s.split('-').collect();
                let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
                if lengths != [8, 4, 4, 4, 12] {
                    return Err(Error::InvalidIdentifier(s.to_owned()));
                }
                groups.concat()
            }
            _ => return Err(Error::InvalidIdentifier(s.to_owned())),
        };

        if !simple.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidIdentifier(s.to_owned()));
        }

        u128::from_str_radix(&simple, 16)
            .map(Self::from_raw)
            .map_err(|_| Error::InvalidIdentifier(s.to_owned()))
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}
