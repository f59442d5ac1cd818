//! [`Activity`] definitions.

use common::Money;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Accommodation;

/// Optional paid activity (kayaking, bonfire, etc.) offered with an
/// [`Accommodation`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Activity {
    /// ID of this [`Activity`].
    pub id: Id,

    /// [`Name`] of this [`Activity`].
    pub name: Name,

    /// Price of this [`Activity`] for a single guest.
    pub price: Money,
}

/// ID of an [`Activity`].
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

/// Name of an [`Activity`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (name.trim() == name && !name.is_empty() && name.len() <= 256)
            .then_some(Self(name))
    }
}
