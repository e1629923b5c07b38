use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{FlakeId, Identifier, SortableId};

/// Human-readable formats get the hyphenated string; binary formats get the
/// raw `u128`.
impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(self)
        } else {
            self.to_raw().serialize(s)
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct IdentifierVisitor;

        impl de::Visitor<'_> for IdentifierVisitor {
            type Value = Identifier;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a hyphenated or 32-digit hex identifier")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        if d.is_human_readable() {
            d.deserialize_str(IdentifierVisitor)
        } else {
            u128::deserialize(d).map(Identifier::from_raw)
        }
    }
}

macro_rules! serde_via_identifier {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                Identifier::from(*self).serialize(s)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                Identifier::deserialize(d).map(Self::from)
            }
        }
    )*};
}

serde_via_identifier!(FlakeId, SortableId);

/// Serializes any identifier as its native `u128`, regardless of format.
///
/// ```
/// # use idforge::Identifier;
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Row {
///     #[serde(with = "idforge::as_native")]
///     id: Identifier,
/// }
/// ```
pub mod as_native {
    use super::{Deserialize, Deserializer, Identifier, Serialize, Serializer};

    /// Serialize an identifier as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Copy + Into<Identifier>,
        S: Serializer,
    {
        (*id).into().to_raw().serialize(s)
    }

    /// Deserialize an identifier from its native integer representation.
    ///
    /// Every `u128` is a valid identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: From<Identifier>,
        D: Deserializer<'de>,
    {
        u128::deserialize(d).map(|raw| ID::from(Identifier::from_raw(raw)))
    }
}
