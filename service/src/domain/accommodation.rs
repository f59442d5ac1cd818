//! [`Accommodation`] definitions.

use std::num::NonZeroU16;

use common::Money;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{activity, Activity};

/// Bookable accommodation of the resort, along with its base pricing.
///
/// Fetched once per booking session and never changes during it.
#[derive(Clone, Debug)]
pub struct Accommodation {
    /// ID of this [`Accommodation`].
    pub id: Id,

    /// [`Name`] of this [`Accommodation`].
    pub name: Name,

    /// Base number of rooms of this [`Accommodation`], before any
    /// date-specific overrides.
    pub rooms: RoomCount,

    /// Nightly rate for a single adult.
    pub adult_rate: Money,

    /// Nightly rate for a single child.
    pub child_rate: Money,

    /// Maximum number of guests in a single room.
    pub capacity: Capacity,

    /// Optional [`Activity`]s offered along with this [`Accommodation`].
    pub activities: Vec<Activity>,
}

impl Accommodation {
    /// Returns the offered [`Activity`] with the provided ID, if any.
    #[must_use]
    pub fn activity(&self, id: activity::Id) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }
}

/// ID of an [`Accommodation`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

/// Name of an [`Accommodation`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `accommodation::Name`")
    }
}

/// Number of rooms.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct RoomCount(u16);

impl RoomCount {
    /// Zero [`RoomCount`].
    pub const ZERO: Self = Self(0);

    /// Single room.
    pub const ONE: Self = Self(1);

    /// Creates a [`RoomCount`] from the provided value, saturating it into
    /// the representable range.
    #[must_use]
    pub fn saturating_from(value: i64) -> Self {
        Self(u16::try_from(value.max(0)).unwrap_or(u16::MAX))
    }

    /// Returns the number of rooms as a [`usize`].
    #[must_use]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

/// Maximum number of guests in a single room.
///
/// Always at least one guest.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Capacity(NonZeroU16);

impl Capacity {
    /// Creates a new [`Capacity`] if the provided value is not zero.
    #[must_use]
    pub fn new(guests: u16) -> Option<Self> {
        NonZeroU16::new(guests).map(Self)
    }

    /// Returns the number of guests fitting into a single room.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0.get()
    }
}
