//! [`DateOverride`] definitions.

use std::{collections::HashMap, fmt};

use common::{Date, Money};
use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer,
};

#[cfg(doc)]
use crate::domain::Accommodation;

/// Date-specific exception to the base room count and nightly rates of an
/// [`Accommodation`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateOverride {
    /// [`Date`] this [`DateOverride`] applies to.
    pub date: Date,

    /// Rooms added to (or removed from) the base room count on the [`Date`].
    pub extra_rooms: ExtraRooms,

    /// Nightly adult rate replacing the base one, if any.
    pub adult_rate: Option<Money>,

    /// Nightly child rate replacing the base one, if any.
    pub child_rate: Option<Money>,
}

/// Number of rooms a [`DateOverride`] adds to the base room count.
///
/// May be negative. Deserialization is lenient about the upstream data:
/// `null`, `"null"` and empty strings are all treated as `0`, while numeric
/// strings are parsed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExtraRooms(i32);

impl ExtraRooms {
    /// No extra rooms.
    pub const ZERO: Self = Self(0);

    /// Creates a new [`ExtraRooms`] delta.
    #[must_use]
    pub const fn new(delta: i32) -> Self {
        Self(delta)
    }

    /// Returns the delta of rooms.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ExtraRooms {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// [`de::Visitor`] accepting anything resembling an integer.
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = ExtraRooms;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer, a numeric string or null")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(ExtraRooms)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i32::try_from(v).map(ExtraRooms).map_err(|_| {
                    E::invalid_value(Unexpected::Unsigned(v), &self)
                })
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if v.fract() == 0.0
                    && v >= f64::from(i32::MIN)
                    && v <= f64::from(i32::MAX)
                {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "range and fraction checked above"
                    )]
                    Ok(ExtraRooms(v as i32))
                } else {
                    Err(E::invalid_value(Unexpected::Float(v), &self))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                let trimmed = v.trim();
                if trimmed.is_empty()
                    || trimmed.eq_ignore_ascii_case("null")
                    || trimmed.eq_ignore_ascii_case("undefined")
                {
                    return Ok(ExtraRooms::ZERO);
                }
                trimmed
                    .parse()
                    .map(ExtraRooms)
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ExtraRooms::ZERO)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ExtraRooms::ZERO)
            }

            fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// Sparse table of [`DateOverride`]s keyed by their normalized [`Date`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Overrides(HashMap<Date, DateOverride>);

impl Overrides {
    /// Returns the [`DateOverride`] for the provided [`Date`], if any.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<&DateOverride> {
        self.0.get(&date)
    }

    /// Returns the [`ExtraRooms`] on the provided [`Date`].
    ///
    /// [`ExtraRooms::ZERO`] is returned if there is no [`DateOverride`] for
    /// the [`Date`].
    #[must_use]
    pub fn extra_rooms(&self, date: Date) -> ExtraRooms {
        self.get(date).map_or(ExtraRooms::ZERO, |o| o.extra_rooms)
    }

    /// Returns the number of [`DateOverride`]s in this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this table has no [`DateOverride`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Later rows win over earlier ones for the same [`Date`].
impl FromIterator<DateOverride> for Overrides {
    fn from_iter<I: IntoIterator<Item = DateOverride>>(iter: I) -> Self {
        Self(iter.into_iter().map(|o| (o.date, o)).collect())
    }
}
