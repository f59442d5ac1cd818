//! [`Accommodation`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Bookable accommodation of the resort.
#[derive(Clone, Debug, From)]
pub struct Accommodation(domain::Accommodation);

/// Bookable accommodation of the resort.
#[graphql_object(context = Context)]
impl Accommodation {
    /// Unique identifier of this `Accommodation`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Accommodation`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Base number of rooms of this `Accommodation`.
    ///
    /// The number of rooms actually available on a date may differ.
    pub fn rooms(&self) -> i32 {
        i32::from(u16::from(self.0.rooms))
    }

    /// Maximum number of guests in a single room.
    pub fn capacity(&self) -> i32 {
        i32::from(self.0.capacity.get())
    }

    /// Base nightly rate for a single adult.
    pub fn adult_rate(&self) -> Money {
        self.0.adult_rate
    }

    /// Base nightly rate for a single child.
    pub fn child_rate(&self) -> Money {
        self.0.child_rate
    }

    /// Optional activities offered along with this `Accommodation`.
    pub fn activities(&self) -> Vec<Activity> {
        self.0.activities.iter().cloned().map(Into::into).collect()
    }
}

/// Unique identifier of an `Accommodation`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::accommodation::Id)]
#[into(domain::accommodation::Id)]
#[graphql(name = "AccommodationId", transparent)]
pub struct Id(Uuid);

/// Name of an `Accommodation`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AccommodationName",
    with = scalar::Via::<domain::accommodation::Name>,
)]
pub struct Name(domain::accommodation::Name);

/// Optional paid activity, charged per guest.
#[derive(Clone, Debug, From)]
pub struct Activity(domain::Activity);

/// Optional paid activity, charged per guest.
#[graphql_object(context = Context)]
impl Activity {
    /// Unique identifier of this `Activity`.
    pub fn id(&self) -> ActivityId {
        self.0.id.into()
    }

    /// Name of this `Activity`.
    pub fn name(&self) -> &str {
        self.0.name.as_ref()
    }

    /// Price of this `Activity` for a single guest.
    pub fn price(&self) -> Money {
        self.0.price
    }
}

/// Unique identifier of an `Activity`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::activity::Id)]
#[into(domain::activity::Id)]
#[graphql(transparent)]
pub struct ActivityId(Uuid);
