//! Calendar [`Date`] utilities.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    UtcOffset,
};

use crate::DateTimeOf;

/// Format of a [`Date`] string representation.
const FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Format of a [`Date`] human-readable representation.
const HUMAN_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day padding:none] [month repr:short] [year]");

/// Format of an [`Offset`] string representation.
const OFFSET_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Calendar date without any time or time zone component.
///
/// Used as a normalized key for any date-indexed lookups, so two moments of
/// the same local day always resolve to the same [`Date`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the current [`Date`] at the provided [`Offset`].
    #[must_use]
    pub fn today(offset: Offset) -> Self {
        Self(time::OffsetDateTime::now_utc().to_offset(offset.0).date())
    }

    /// Returns the [`Date`] the provided [`DateTimeOf`] falls on at the
    /// provided [`Offset`].
    #[must_use]
    pub fn of<Of: ?Sized>(dt: DateTimeOf<Of>, offset: Offset) -> Self {
        Self(time::OffsetDateTime::from(dt).to_offset(offset.0).date())
    }

    /// Returns the [`Date`] following this one.
    ///
    /// [`None`] is returned if this [`Date`] is the last representable one.
    #[must_use]
    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Returns the human-readable representation of this [`Date`], like
    /// `25 Dec 2025`.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_human(&self) -> String {
        self.0.format(HUMAN_FORMAT).expect("infallible")
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Parses a [`Date`] either from `YYYY-MM-DD` string, or from an
    /// [RFC 3339] date and time, whose time and offset are stripped.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT)
            .or_else(|e| {
                time::OffsetDateTime::parse(s, &Rfc3339)
                    .map(|dt| dt.date())
                    .map_err(|_| e)
            })
            .map(Self)
            .map_err(ParseError)
    }
}

/// Error of parsing [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `Date`: {_0}")]
pub struct ParseError(time::error::Parse);

/// Fixed offset from UTC, like `+05:30`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Offset(UtcOffset);

impl Offset {
    /// UTC [`Offset`].
    pub const UTC: Self = Self(UtcOffset::UTC);

    /// Creates a new [`Offset`] from the provided hours and minutes.
    ///
    /// [`None`] is returned if the components are out of range.
    #[must_use]
    pub fn from_hms(hours: i8, minutes: i8) -> Option<Self> {
        UtcOffset::from_hms(hours, minutes, 0).ok().map(Self)
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(OFFSET_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for Offset {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UtcOffset::parse(s, OFFSET_FORMAT)
            .map(Self)
            .map_err(|_| "invalid `Offset`, expected `[+-]HH:MM`")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Date, Offset};

    impl Serialize for Date {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            String::deserialize(deserializer)?
                .parse()
                .map_err(de::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for Offset {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            String::deserialize(deserializer)?
                .parse()
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = super::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    s.parse().map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}
